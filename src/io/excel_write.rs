use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::model::{CellValue, SheetTable};
use crate::normalize;

/// Writes the analysis-mode output workbook: one sheet per table, header
/// row first. Cells under a configured date column are written as real
/// dates with a `yyyy-mm-dd` display format; everything else keeps its
/// source type.
pub fn write_workbook(path: &Path, tables: &[SheetTable], date_columns: &[&str]) -> Result<()> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        let date_column: Vec<bool> = table
            .columns
            .iter()
            .map(|header| date_columns.contains(&header.trim()))
            .collect();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_idx = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let is_date_column = date_column.get(col_idx).copied().unwrap_or(false);
                let col_idx = col_idx as u16;

                if is_date_column && let Some(date) = normalize::parse_date(cell) {
                    worksheet.write_datetime_with_format(row_idx, col_idx, &date, &date_format)?;
                    continue;
                }

                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(value) => {
                        worksheet.write_string(row_idx, col_idx, value)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(row_idx, col_idx, *value)?;
                    }
                    CellValue::Boolean(value) => {
                        worksheet.write_boolean(row_idx, col_idx, *value)?;
                    }
                    CellValue::Date(value) => {
                        // Date cells outside date columns keep a readable
                        // textual rendering.
                        worksheet.write_string(row_idx, col_idx, &cell_text(value))?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn cell_text(value: &chrono::NaiveDateTime) -> String {
    CellValue::Date(*value).display()
}
