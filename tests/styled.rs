use roster_tools::transcribe;
use tempfile::tempdir;

/// Builds a source workbook exercising the style attributes the styled
/// merge must carry over.
fn styled_source() -> umya_spreadsheet::Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");

    sheet.get_cell_mut("A1").set_value("급여 총계");
    {
        let style = sheet.get_cell_mut("A1").get_style_mut();
        style.get_font_mut().set_bold(true);
        style.get_font_mut().set_italic(true);
        style.set_background_color("FFFFCC00");
    }

    sheet.get_cell_mut("B2").set_value_number(1234567);
    // Red source text, the merge must force it to black.
    sheet
        .get_cell_mut("B2")
        .get_style_mut()
        .get_font_mut()
        .get_color_mut()
        .set_argb("FFFF0000");

    sheet.get_cell_mut("C1").set_formula("SUM(B2:B3)");
    sheet.add_merge_cells("A1:B1");
    sheet.get_column_dimension_mut("A").set_width(25.5);

    book
}

#[test]
fn transcription_round_trip_preserves_styles() {
    let source = styled_source();
    let mut destination = transcribe::new_styled_workbook();
    transcribe::transcribe_workbook(&source, &mut destination).expect("workbook transcribed");

    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("merged.xlsx");
    transcribe::write_styled_workbook(&destination, &path).expect("workbook written");
    let restored = transcribe::read_styled_workbook(&path).expect("workbook read back");

    let sheet = restored.get_sheet_by_name("Sheet1").expect("sheet copied");

    let title = sheet.get_cell("A1").expect("title cell");
    assert_eq!(title.get_value(), "급여 총계");
    let font = title.get_style().get_font().expect("title font").clone();
    assert!(*font.get_bold());
    assert!(*font.get_italic());

    let fill_color = title
        .get_style()
        .get_fill()
        .and_then(|fill| fill.get_pattern_fill())
        .and_then(|pattern| pattern.get_foreground_color())
        .map(|color| color.get_argb().to_string());
    assert_eq!(fill_color.as_deref(), Some("FFFFCC00"));

    let amount = sheet.get_cell("B2").expect("amount cell");
    assert_eq!(amount.get_value(), "1234567");
    // Numeric non-formula cells get the thousands-separator format.
    let format = amount
        .get_style()
        .get_number_format()
        .expect("number format")
        .get_format_code()
        .to_string();
    assert_eq!(format, "#,##0");
    // And the font color is forced to black.
    let amount_color = amount
        .get_style()
        .get_font()
        .expect("amount font")
        .get_color()
        .get_argb()
        .to_string();
    assert_eq!(amount_color, "FF000000");

    let formula = sheet.get_cell("C1").expect("formula cell");
    assert!(formula.is_formula());
    assert!(formula.get_formula().contains("SUM(B2:B3)"));

    let merges: Vec<String> = sheet
        .get_merge_cells()
        .iter()
        .map(|range| range.get_range())
        .collect();
    assert_eq!(merges, vec!["A1:B1".to_string()]);

    let width = restored
        .get_sheet_by_name("Sheet1")
        .expect("sheet copied")
        .get_column_dimension("A")
        .expect("column dimension copied")
        .get_width();
    assert_eq!(*width, 25.5);
}

#[test]
fn same_named_sheets_are_replaced_last_writer_wins() {
    let mut first = umya_spreadsheet::new_file();
    first
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .get_cell_mut("A1")
        .set_value("먼저");
    let mut second = umya_spreadsheet::new_file();
    second
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .get_cell_mut("A1")
        .set_value("나중");

    let mut destination = transcribe::new_styled_workbook();
    transcribe::transcribe_workbook(&first, &mut destination).expect("first transcribed");
    transcribe::transcribe_workbook(&second, &mut destination).expect("second transcribed");

    assert_eq!(destination.get_sheet_count(), 1);
    let value = destination
        .get_sheet_by_name("Sheet1")
        .expect("sheet present")
        .get_cell("A1")
        .expect("cell present")
        .get_value()
        .to_string();
    assert_eq!(value, "나중");
}

#[test]
fn numeric_looking_text_stays_text() {
    let mut source = umya_spreadsheet::new_file();
    let sheet = source.get_sheet_by_name_mut("Sheet1").expect("default sheet");
    // Employee codes carry leading zeros and must survive verbatim.
    sheet.get_cell_mut("A1").set_value_string("0012345");
    sheet.get_cell_mut("B1").set_value_number(12345);

    let mut destination = transcribe::new_styled_workbook();
    transcribe::transcribe_workbook(&source, &mut destination).expect("workbook transcribed");

    let copied = destination.get_sheet_by_name("Sheet1").expect("sheet present");
    assert_eq!(
        copied.get_cell("A1").expect("text cell").get_value(),
        "0012345"
    );
    assert_eq!(
        copied.get_cell("B1").expect("number cell").get_value(),
        "12345"
    );
}

#[test]
fn destination_is_independent_of_later_source_edits() {
    let mut source = umya_spreadsheet::new_file();
    source
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .get_cell_mut("A1")
        .set_value("원본");

    let mut destination = transcribe::new_styled_workbook();
    transcribe::transcribe_workbook(&source, &mut destination).expect("workbook transcribed");

    source
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .get_cell_mut("A1")
        .set_value("변경");

    let copied = destination
        .get_sheet_by_name("Sheet1")
        .expect("sheet present")
        .get_cell("A1")
        .expect("cell present")
        .get_value()
        .to_string();
    assert_eq!(copied, "원본");
}

#[test]
fn styled_merge_orders_files_and_keeps_sheet_names() {
    let dir = tempdir().expect("temporary directory");
    let listed = dir.path().join("차란차.xlsx");
    let unlisted = dir.path().join("aaa.xlsx");
    let output = dir.path().join("merged.xlsx");

    let mut first = umya_spreadsheet::new_file();
    first
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .set_name("보험료");
    umya_spreadsheet::writer::xlsx::write(&first, &listed).expect("input written");

    let mut second = umya_spreadsheet::new_file();
    second
        .get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .set_name("기타");
    umya_spreadsheet::writer::xlsx::write(&second, &unlisted).expect("input written");

    // The listed entity sorts first even when passed last.
    roster_tools::merge::merge_styled(&[unlisted, listed], &output)
        .expect("styled merge succeeded");

    let merged = transcribe::read_styled_workbook(&output).expect("output read back");
    let names: Vec<String> = merged
        .get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect();
    assert_eq!(names, vec!["보험료", "기타"]);
}
