use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::Result;
use crate::model::{CellValue, RawSheet};

/// Reads every worksheet of an xlsx file into raw cell grids. Cell values
/// are the computed ones; formulas are not needed on the analysis path.
pub fn read_raw_sheets(path: &Path) -> Result<Vec<RawSheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = match workbook.worksheet_range(&name) {
            Some(range_result) => range_result?,
            None => continue,
        };
        let rows = grid_from_range(&range);
        sheets.push(RawSheet { name, rows });
    }

    Ok(sheets)
}

/// Converts a calamine range into an A1-anchored grid. calamine trims the
/// range to the used cells, so leading empty rows and columns are padded
/// back to keep row/column indexes consistent with the source sheet.
fn grid_from_range(range: &calamine::Range<DataType>) -> Vec<Vec<CellValue>> {
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(row_offset + range.height());
    rows.resize_with(row_offset, Vec::new);

    for source_row in range.rows() {
        let mut row = Vec::with_capacity(col_offset + source_row.len());
        row.resize(col_offset, CellValue::Empty);
        row.extend(source_row.iter().map(convert_cell));
        rows.push(row);
    }

    rows
}

fn convert_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::DateTime(_) => cell
            .as_datetime()
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty),
        other => CellValue::Text(other.to_string()),
    }
}
