//! Merge orchestration: input ordering, per-file fault isolation, and
//! assembly of the output workbook in both modes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::aggregate;
use crate::config::{
    self, CATEGORY_COLUMN, DATE_COLUMNS, DEPARTMENT_COLUMN, MAX_SHEET_NAME_CHARS, MergeConfig,
    NAME_COLUMN, NEW_HIRES_SHEET, RESIGNED_SHEET, TITLE_COLUMN,
};
use crate::error::{MergeError, Result};
use crate::io::{excel_read, excel_write};
use crate::locate;
use crate::model::{CellValue, MonthlyStatistics, RosterAccumulator, RosterEntry, SheetTable};
use crate::normalize;
use crate::redact;
use crate::transcribe;

/// Column header naming the source sheet on the summary rosters.
const SOURCE_SHEET_COLUMN: &str = "시트명";

/// What one analysis merge produced besides the workbook itself.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// Per-sheet statistics for the selected month, in output order.
    pub statistics: Vec<MonthlyStatistics>,
    /// Redacted column names per destination sheet, for audit display.
    pub removed_columns: Vec<(String, Vec<String>)>,
    /// Files that contributed nothing and were skipped.
    pub skipped_files: Vec<PathBuf>,
}

/// Everything one usable sheet contributes to the merge, keyed by its
/// destination name. Replacing a sheet replaces all of it, so a superseded
/// sheet leaves no statistics or roster rows behind.
struct ProcessedSheet {
    table: SheetTable,
    removed_columns: Vec<String>,
    statistics: MonthlyStatistics,
    roster: RosterAccumulator,
}

/// Entity identifier of an input file: its base name without extension.
pub fn file_entity(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Truncates a sheet name to the xlsx limit. Counted in characters, not
/// bytes, so multi-byte names are never split mid-character.
pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

/// Orders input files by the fixed entity ranking; unlisted entities keep
/// their relative input order after all listed ones (stable sort).
pub fn order_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut ordered = inputs.to_vec();
    ordered.sort_by_key(|path| config::entity_rank(&file_entity(path)));
    ordered
}

/// Runs the analysis merge: locate tables, redact, normalize, aggregate,
/// and write the merged workbook with the summary rosters appended.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn merge_analysis(
    inputs: &[PathBuf],
    output: &Path,
    config: &MergeConfig,
) -> Result<MergeReport> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputFiles);
    }

    let mut sheets: Vec<ProcessedSheet> = Vec::new();
    let mut report = MergeReport::default();

    for path in order_inputs(inputs) {
        let entity = file_entity(&path);
        let raw_sheets = match excel_read::read_raw_sheets(&path) {
            Ok(sheets) => sheets,
            Err(error) => {
                warn!(file = %path.display(), %error, "unreadable workbook, skipping file");
                report.skipped_files.push(path.clone());
                continue;
            }
        };

        let mut usable = 0usize;
        for raw in &raw_sheets {
            let Some(located) = locate::locate_table(raw) else {
                warn!(file = %path.display(), sheet = %raw.name, "empty sheet, skipping");
                continue;
            };

            let (mut table, removed) = redact::redact_columns(located, &config.keywords);
            table.sheet_name = truncate_sheet_name(&entity);
            if !removed.is_empty() {
                info!(sheet = %table.sheet_name, columns = ?removed, "redacted columns");
            }

            let records = normalize::normalize_sheet(&table, &entity, config);
            let statistics =
                aggregate::sheet_statistics(&records, &table.sheet_name, config.selected_month);
            let mut roster = RosterAccumulator::default();
            aggregate::collect_roster(&records, config.previous_month, &mut roster);

            upsert_sheet(
                &mut sheets,
                ProcessedSheet {
                    table: normalize::scrub_excluded(table, &entity),
                    removed_columns: removed,
                    statistics,
                    roster,
                },
            );
            usable += 1;
        }

        if usable == 0 {
            warn!(file = %path.display(), "no usable sheets, skipping file");
            report.skipped_files.push(path);
        }
    }

    if sheets.is_empty() {
        return Err(MergeError::InvalidWorkbook(
            "no usable sheets in any input file".into(),
        ));
    }

    let mut tables: Vec<SheetTable> = Vec::with_capacity(sheets.len() + 2);
    let mut roster = RosterAccumulator::default();
    for sheet in sheets {
        if !sheet.removed_columns.is_empty() {
            report
                .removed_columns
                .push((sheet.table.sheet_name.clone(), sheet.removed_columns));
        }
        report.statistics.push(sheet.statistics);
        roster.new_hires.extend(sheet.roster.new_hires);
        roster.resigned.extend(sheet.roster.resigned);
        tables.push(sheet.table);
    }

    if !roster.new_hires.is_empty() {
        tables.push(roster_table(NEW_HIRES_SHEET, &roster.new_hires));
    }
    if !roster.resigned.is_empty() {
        tables.push(roster_table(RESIGNED_SHEET, &roster.resigned));
    }

    debug!(sheet_count = tables.len(), "workbook assembled");
    excel_write::write_workbook(output, &tables, &DATE_COLUMNS)?;
    Ok(report)
}

/// Runs the style-preserving merge: every sheet of every readable input is
/// transcribed verbatim, formatting included, into one workbook.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn merge_styled(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputFiles);
    }

    let mut destination = transcribe::new_styled_workbook();
    for path in order_inputs(inputs) {
        let source = match transcribe::read_styled_workbook(&path) {
            Ok(workbook) => workbook,
            Err(error) => {
                warn!(file = %path.display(), %error, "unreadable workbook, skipping file");
                continue;
            }
        };
        if let Err(error) = transcribe::transcribe_workbook(&source, &mut destination) {
            warn!(file = %path.display(), %error, "failed to transcribe workbook, skipping file");
        }
    }

    if destination.get_sheet_count() == 0 {
        return Err(MergeError::InvalidWorkbook(
            "no usable sheets in any input file".into(),
        ));
    }

    info!(sheet_count = destination.get_sheet_count(), "workbook assembled");
    transcribe::write_styled_workbook(&destination, output)
}

/// Inserts a processed sheet, replacing any earlier one with the same
/// destination name (last writer wins). Statistics and roster rows of the
/// replaced sheet are discarded along with its table.
fn upsert_sheet(sheets: &mut Vec<ProcessedSheet>, sheet: ProcessedSheet) {
    match sheets
        .iter_mut()
        .find(|existing| existing.table.sheet_name == sheet.table.sheet_name)
    {
        Some(existing) => *existing = sheet,
        None => sheets.push(sheet),
    }
}

fn roster_table(name: &str, entries: &[RosterEntry]) -> SheetTable {
    let text = |value: &Option<String>| match value {
        Some(value) => CellValue::Text(value.clone()),
        None => CellValue::Empty,
    };

    SheetTable {
        sheet_name: name.to_string(),
        columns: vec![
            CATEGORY_COLUMN.to_string(),
            DEPARTMENT_COLUMN.to_string(),
            NAME_COLUMN.to_string(),
            TITLE_COLUMN.to_string(),
            SOURCE_SHEET_COLUMN.to_string(),
        ],
        rows: entries
            .iter()
            .map(|entry| {
                vec![
                    match entry.category {
                        Some(category) => CellValue::Text(category.label().to_string()),
                        None => CellValue::Empty,
                    },
                    text(&entry.department),
                    CellValue::Text(entry.name.clone()),
                    text(&entry.title),
                    CellValue::Text(entry.entity.clone()),
                ]
            })
            .collect(),
    }
}
