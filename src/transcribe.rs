//! Style-preserving sheet transcription for the styled merge mode.
//!
//! Built on `umya-spreadsheet`, the only backend here that can read cell
//! styles back out of an xlsx file. Copies are deep: the destination owns
//! independent clones of every value, formula, and style object, so later
//! edits to either workbook cannot affect the other.

use std::path::Path;

use umya_spreadsheet::{CellRawValue, Color, Spreadsheet, Worksheet};

use crate::error::{MergeError, Result};

/// Display format applied to plain numeric cells in the merged output.
const THOUSANDS_FORMAT: &str = "#,##0";

/// Opens a workbook with formulas and styles intact.
pub fn read_styled_workbook(path: &Path) -> Result<Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|error| MergeError::StyledWorkbook(error.to_string()))
}

/// Creates an empty destination workbook with no sheets.
pub fn new_styled_workbook() -> Spreadsheet {
    umya_spreadsheet::new_file_empty_worksheet()
}

/// Saves the merged workbook.
pub fn write_styled_workbook(workbook: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(workbook, path)
        .map_err(|error| MergeError::StyledWorkbook(error.to_string()))
}

/// Transcribes every sheet of `source` into `destination` under its
/// original name.
pub fn transcribe_workbook(source: &Spreadsheet, destination: &mut Spreadsheet) -> Result<()> {
    for sheet in source.get_sheet_collection() {
        transcribe_sheet(sheet, destination, sheet.get_name())?;
    }
    Ok(())
}

/// Copies one sheet into the destination workbook under the given name.
///
/// A pre-existing destination sheet of that name is replaced (last writer
/// wins). Column widths, row heights, values, formulas, styles, and merged
/// ranges are carried over; fonts are forced to black, and numeric
/// non-formula cells receive a thousands-separator display format.
pub fn transcribe_sheet(
    source: &Worksheet,
    destination: &mut Spreadsheet,
    name: &str,
) -> Result<()> {
    if destination.get_sheet_by_name(name).is_some() {
        destination
            .remove_sheet_by_name(name)
            .map_err(|error| MergeError::StyledWorkbook(error.to_string()))?;
    }
    let target = destination
        .new_sheet(name)
        .map_err(|error| MergeError::StyledWorkbook(error.to_string()))?;

    for column in source.get_column_dimensions() {
        target
            .get_column_dimension_by_number_mut(column.get_col_num())
            .set_width(*column.get_width());
    }
    for row in source.get_row_dimensions() {
        target
            .get_row_dimension_mut(row.get_row_num())
            .set_height(*row.get_height());
    }

    for cell in source.get_cell_collection() {
        let coordinate = cell.get_coordinate();
        let col_num = *coordinate.get_col_num();
        let row_num = *coordinate.get_row_num();
        let is_formula = cell.is_formula();
        let is_numeric = matches!(cell.get_raw_value(), CellRawValue::Numeric(_));

        let mut style = cell.get_style().clone();
        if style.get_font().is_some() {
            style.get_font_mut().get_color_mut().set_argb(Color::COLOR_BLACK);
        }
        if is_numeric && !is_formula {
            style
                .get_number_format_mut()
                .set_format_code(THOUSANDS_FORMAT);
        }

        let copy = target.get_cell_mut((col_num, row_num));
        if is_formula {
            copy.set_formula(cell.get_formula());
        } else {
            // Typed setters keep the source type; `set_value` would re-infer
            // it from the string and turn numeric-looking text into numbers.
            match cell.get_raw_value() {
                CellRawValue::Numeric(number) => copy.set_value_number(*number),
                CellRawValue::Bool(value) => copy.set_value_bool(*value),
                _ => copy.set_value_string(cell.get_value()),
            };
        }
        copy.set_style(style);
    }

    for merge in source.get_merge_cells() {
        target.add_merge_cells(merge.get_range());
    }

    Ok(())
}
