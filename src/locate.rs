//! Table discovery inside loosely structured worksheets. The header row is
//! not fixed at row 1: some entities prepend title banners or filter rows
//! above the real table, marked by a literal `"No"` in the first column.

use crate::config::HEADER_SENTINEL;
use crate::model::{CellValue, RawSheet, SheetTable};

/// Locates the tabular data inside a raw sheet.
///
/// Scans rows top to bottom; the first row whose first cell equals the
/// sentinel `"No"` becomes the header and every following row is data.
/// Without a sentinel, row 0 is assumed to be the header. Returns `None`
/// for sheets with no rows or only empty cells, which callers report and
/// skip.
pub fn locate_table(sheet: &RawSheet) -> Option<SheetTable> {
    if sheet.rows.is_empty() || sheet.rows.iter().all(|row| row.iter().all(CellValue::is_empty)) {
        return None;
    }

    let header_index = sheet
        .rows
        .iter()
        .position(|row| matches!(row.first(), Some(CellValue::Text(text)) if text == HEADER_SENTINEL))
        .unwrap_or(0);

    let columns: Vec<String> = sheet.rows[header_index]
        .iter()
        .map(CellValue::display)
        .collect();
    let rows: Vec<Vec<CellValue>> = sheet.rows[header_index + 1..].to_vec();

    Some(SheetTable {
        sheet_name: sheet.name.clone(),
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn sentinel_row_becomes_header() {
        let sheet = RawSheet {
            name: "roster".into(),
            rows: vec![
                vec![text("직원 현황"), CellValue::Empty],
                vec![CellValue::Empty, CellValue::Empty],
                vec![text("No"), text("성명")],
                vec![CellValue::Number(1.0), text("홍길동")],
            ],
        };

        let table = locate_table(&sheet).expect("table located");
        assert_eq!(table.columns, vec!["No", "성명"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], text("홍길동"));
    }

    #[test]
    fn falls_back_to_first_row_without_sentinel() {
        let sheet = RawSheet {
            name: "roster".into(),
            rows: vec![
                vec![text("성명"), text("부서명")],
                vec![text("홍길동"), text("영업")],
            ],
        };

        let table = locate_table(&sheet).expect("table located");
        assert_eq!(table.columns, vec!["성명", "부서명"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn only_the_first_sentinel_counts() {
        let sheet = RawSheet {
            name: "roster".into(),
            rows: vec![
                vec![text("No"), text("성명")],
                vec![text("No"), text("가짜")],
            ],
        };

        let table = locate_table(&sheet).expect("table located");
        assert_eq!(table.columns, vec!["No", "성명"]);
        // The later sentinel row is plain data.
        assert_eq!(table.rows, vec![vec![text("No"), text("가짜")]]);
    }

    #[test]
    fn empty_sheets_are_skipped() {
        let empty = RawSheet {
            name: "empty".into(),
            rows: Vec::new(),
        };
        assert!(locate_table(&empty).is_none());

        let blank = RawSheet {
            name: "blank".into(),
            rows: vec![vec![CellValue::Empty, CellValue::Empty], vec![CellValue::Empty]],
        };
        assert!(locate_table(&blank).is_none());
    }

    #[test]
    fn single_header_row_yields_no_data() {
        let sheet = RawSheet {
            name: "roster".into(),
            rows: vec![vec![text("성명")]],
        };
        let table = locate_table(&sheet).expect("table located");
        assert!(table.rows.is_empty());
    }
}
