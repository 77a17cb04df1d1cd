//! Keyword-based removal of personally identifying columns.

use crate::model::SheetTable;

/// Removes every column whose (whitespace-trimmed) name contains any of the
/// keywords as a case-sensitive substring, together with the matching cell
/// of each data row. Returns the surviving table and the removed column
/// names for audit display. An empty keyword set is a no-op; applying the
/// filter twice yields the same columns as applying it once.
pub fn redact_columns(table: SheetTable, keywords: &[String]) -> (SheetTable, Vec<String>) {
    let trimmed: Vec<String> = table
        .columns
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let keep: Vec<bool> = trimmed
        .iter()
        .map(|name| !keywords.iter().any(|keyword| name.contains(keyword)))
        .collect();

    let removed: Vec<String> = trimmed
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| !**keep)
        .map(|(name, _)| name.clone())
        .collect();

    let columns: Vec<String> = trimmed
        .into_iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|(name, _)| name)
        .collect();

    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .filter(|(index, _)| keep.get(*index).copied().unwrap_or(true))
                .map(|(_, cell)| cell)
                .collect()
        })
        .collect();

    (
        SheetTable {
            sheet_name: table.sheet_name,
            columns,
            rows,
        },
        removed,
    )
}
