//! Turns located tables into normalized [`EmployeeRecord`]s: renames legacy
//! columns, applies per-entity exclusions, coerces heterogeneous dates, and
//! derives the employee category.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::{
    self, CATEGORY_COLUMN, CONTRACT_TYPE_COLUMN, DEPARTMENT_COLUMN, ENGLISH_NAME_COLUMN,
    HIRE_DATE_COLUMN, LEGACY_HIRE_DATE_COLUMN, MergeConfig, NAME_COLUMN, REMARK_COLUMN,
    RESIGN_DATE_COLUMN, RESIGNED_REMARK_PREFIX, TITLE_COLUMN,
};
use crate::model::{CellValue, EmployeeCategory, EmployeeRecord, Month, SheetTable};

/// Normalizes every data row of a table into employee records.
///
/// Rows matching the entity's exclusion denylist (exact match on the name
/// or English name) are dropped entirely; the denylist of other entities is
/// never consulted. Row-level parse failures null the affected field only
/// and never abort the sheet.
pub fn normalize_sheet(
    table: &SheetTable,
    entity: &str,
    config: &MergeConfig,
) -> Vec<EmployeeRecord> {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let find = |name: &str| columns.iter().position(|column| column == name);

    // Legacy "Starting Date" is this entity's hire-date column.
    let hire_index = find(HIRE_DATE_COLUMN).or_else(|| find(LEGACY_HIRE_DATE_COLUMN));
    let resign_index = find(RESIGN_DATE_COLUMN);
    let name_index = find(NAME_COLUMN);
    let english_index = find(ENGLISH_NAME_COLUMN);
    let department_index = find(DEPARTMENT_COLUMN);
    let title_index = find(TITLE_COLUMN);
    let category_index = find(CATEGORY_COLUMN);
    let remark_index = find(REMARK_COLUMN);
    let contract_index = find(CONTRACT_TYPE_COLUMN);

    let field_indexes = [
        hire_index,
        resign_index,
        name_index,
        english_index,
        department_index,
        title_index,
        category_index,
    ];

    let denylist = config::exclusions_for(entity);
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let name = non_empty_text(cell_at(row, name_index));
        let english_name = non_empty_text(cell_at(row, english_index));

        let excluded = denylist.iter().any(|person| {
            name.as_deref() == Some(*person) || english_name.as_deref() == Some(*person)
        });
        if excluded {
            continue;
        }

        let hire_day = parse_date(cell_at(row, hire_index));
        let mut resign_day = parse_date(cell_at(row, resign_index));

        if let Some(remark) = non_empty_text(cell_at(row, remark_index))
            && remark.starts_with(RESIGNED_REMARK_PREFIX)
        {
            resign_day = Some(config.previous_month_last_day);
        }

        let mut category = non_empty_text(cell_at(row, category_index))
            .and_then(|label| EmployeeCategory::parse(&label));
        if category.is_none()
            && let Some(contract) = non_empty_text(cell_at(row, contract_index))
        {
            if contract.contains("FDC") {
                category = Some(EmployeeCategory::Contract);
            }
            if contract.contains("UDC") {
                category = Some(EmployeeCategory::Regular);
            }
        }

        let mut extra = BTreeMap::new();
        for (index, column) in columns.iter().enumerate() {
            if field_indexes.contains(&Some(index)) {
                continue;
            }
            if let Some(value) = non_empty_text(cell_at(row, Some(index))) {
                extra.insert(column.clone(), value);
            }
        }

        records.push(EmployeeRecord {
            entity: entity.to_string(),
            name,
            english_name,
            department: non_empty_text(cell_at(row, department_index)),
            title: non_empty_text(cell_at(row, title_index)),
            category,
            // Day precision is not retained downstream; aggregation works
            // on months only.
            hire_date: hire_day.map(Month::containing),
            resign_date: resign_day.map(Month::containing),
            extra,
        });
    }

    records
}

/// Drops data rows matching the entity's exclusion denylist from a table,
/// so excluded persons never reach the output workbook either. The table
/// keeps its raw cell values otherwise.
pub fn scrub_excluded(table: SheetTable, entity: &str) -> SheetTable {
    let denylist = config::exclusions_for(entity);
    if denylist.is_empty() {
        return table;
    }

    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let name_index = columns.iter().position(|column| column == NAME_COLUMN);
    let english_index = columns
        .iter()
        .position(|column| column == ENGLISH_NAME_COLUMN);

    let rows = table
        .rows
        .into_iter()
        .filter(|row| {
            let matches = |index: Option<usize>| {
                index
                    .and_then(|i| row.get(i))
                    .map(|cell| {
                        let text = cell.display();
                        denylist.iter().any(|person| text.trim() == *person)
                    })
                    .unwrap_or(false)
            };
            !(matches(name_index) || matches(english_index))
        })
        .collect();

    SheetTable { rows, ..table }
}

/// Coerces one cell into a calendar date. Unparseable content yields
/// `None`, never an error.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(datetime) => Some(datetime.date()),
        CellValue::Text(text) => parse_date_text(text),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Datetime strings as exported by some HR systems.
    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

static EMPTY_CELL: CellValue = CellValue::Empty;

fn cell_at<'a>(row: &'a [CellValue], index: Option<usize>) -> &'a CellValue {
    index.and_then(|i| row.get(i)).unwrap_or(&EMPTY_CELL)
}

fn non_empty_text(cell: &CellValue) -> Option<String> {
    let text = cell.display();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MergeConfig {
        MergeConfig::new(
            NaiveDate::from_ymd_opt(2023, 12, 15).expect("valid date"),
            Some("2023-11".parse().expect("month parsed")),
            Vec::new(),
        )
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable {
            sheet_name: "test".into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| CellValue::Text(c.to_string())).collect())
                .collect(),
        }
    }

    #[test]
    fn parses_dates_and_truncates_to_months() {
        let input = table(
            &["성명", "입사일", "퇴사일"],
            &[&["홍길동", "2023-11-03", ""], &["김철수", "n/a", "2023/12/01"]],
        );
        let records = normalize_sheet(&input, "브리티시오토", &config());

        assert_eq!(records[0].hire_date.map(|m| m.to_string()), Some("2023-11".into()));
        assert_eq!(records[0].resign_date, None);
        // Unparseable hire date coerces to null rather than failing.
        assert_eq!(records[1].hire_date, None);
        assert_eq!(records[1].resign_date.map(|m| m.to_string()), Some("2023-12".into()));
    }

    #[test]
    fn legacy_starting_date_column_feeds_hire_date() {
        let input = table(&["성명", "Starting Date"], &[&["홍길동", "2022-05-10"]]);
        let records = normalize_sheet(&input, "BAMC", &config());
        assert_eq!(records[0].hire_date.map(|m| m.to_string()), Some("2022-05".into()));
    }

    #[test]
    fn exclusion_applies_only_to_the_matching_entity() {
        let input = table(&["성명"], &[&["장준호"], &["홍길동"]]);

        let scoped = normalize_sheet(&input, "도이치오토월드", &config());
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].name.as_deref(), Some("홍길동"));

        // The same person on another entity's sheet is kept.
        let elsewhere = normalize_sheet(&input, "브리티시오토", &config());
        assert_eq!(elsewhere.len(), 2);
    }

    #[test]
    fn english_name_exclusion_matches_exactly() {
        let input = table(
            &["English Name"],
            &[&["YOON JONG LYOL"], &["YOON JONG"], &["KIM MINSU"]],
        );
        let records = normalize_sheet(&input, "BAMC", &config());
        let names: Vec<_> = records
            .iter()
            .map(|r| r.english_name.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, vec!["YOON JONG", "KIM MINSU"]);
    }

    #[test]
    fn resignation_remark_sets_previous_month() {
        let input = table(
            &["성명", "입사일", "Remark"],
            &[&["홍길동", "2023-01-02", "Resigned and last working day was Nov 30"]],
        );
        let records = normalize_sheet(&input, "BAMC", &config());
        // Processing date 2023-12-15, so the previous month is 2023-11.
        assert_eq!(records[0].resign_date.map(|m| m.to_string()), Some("2023-11".into()));
    }

    #[test]
    fn category_derived_from_contract_type_when_unset() {
        let input = table(
            &["성명", "사원구분명", "Contract Type"],
            &[
                &["a", "", "FDC 12m"],
                &["b", "", "UDC"],
                &["c", "임원", "FDC"],
                &["d", "", ""],
            ],
        );
        let records = normalize_sheet(&input, "BAMC", &config());
        assert_eq!(records[0].category, Some(EmployeeCategory::Contract));
        assert_eq!(records[1].category, Some(EmployeeCategory::Regular));
        // An explicit category is never overridden by the contract type.
        assert_eq!(records[2].category, Some(EmployeeCategory::Executive));
        assert_eq!(records[3].category, None);
    }

    #[test]
    fn scrubbing_removes_denylisted_rows_only() {
        let input = table(&["No", " 성명 "], &[&["1", "장준호"], &["2", "홍길동"]]);

        let scrubbed = scrub_excluded(input.clone(), "도이치오토월드");
        assert_eq!(scrubbed.rows.len(), 1);
        assert_eq!(scrubbed.rows[0][1], CellValue::Text("홍길동".into()));

        // No denylist for this entity, nothing changes.
        let untouched = scrub_excluded(input.clone(), "차란차");
        assert_eq!(untouched.rows.len(), 2);
    }

    #[test]
    fn unknown_columns_pass_through() {
        let input = table(&["성명", "사번", "비고란"], &[&["홍길동", "A-17", "메모"]]);
        let records = normalize_sheet(&input, "차란차", &config());
        assert_eq!(records[0].extra.get("사번").map(String::as_str), Some("A-17"));
        assert_eq!(records[0].extra.get("비고란").map(String::as_str), Some("메모"));
        assert!(!records[0].extra.contains_key("성명"));
    }

    #[test]
    fn whitespace_padded_columns_are_recognized() {
        let input = table(&[" 성명 ", " 입사일 "], &[&["홍길동", "2023-11-01"]]);
        let records = normalize_sheet(&input, "차란차", &config());
        assert_eq!(records[0].name.as_deref(), Some("홍길동"));
        assert_eq!(records[0].hire_date.map(|m| m.to_string()), Some("2023-11".into()));
    }
}
