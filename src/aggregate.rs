//! Date-windowed headcount statistics and the cross-sheet hire/resignation
//! rosters.

use crate::model::{
    CategoryBreakdown, EmployeeRecord, Month, MonthlyStatistics, RosterAccumulator, RosterEntry,
};

/// True when the record was hired in or before the given month. A null
/// hire date never satisfies the bound.
fn hired_on_or_before(record: &EmployeeRecord, month: Month) -> bool {
    record.hire_date.is_some_and(|hired| hired <= month)
}

/// True when the record had not resigned by the end of the given month:
/// either no resignation is recorded, or it falls strictly after the month.
fn not_yet_resigned(record: &EmployeeRecord, month: Month) -> bool {
    match record.resign_date {
        None => true,
        Some(resigned) => resigned > month,
    }
}

/// A record is active in a month when hired on or before it and not yet
/// resigned after it.
pub fn is_active(record: &EmployeeRecord, month: Month) -> bool {
    hired_on_or_before(record, month) && not_yet_resigned(record, month)
}

/// Computes the six per-sheet counts for the selected month: hires,
/// resignations, and active headcount, each overall and per category.
/// Category breakdowns always report all four fixed categories.
pub fn sheet_statistics(
    records: &[EmployeeRecord],
    sheet: &str,
    month: Month,
) -> MonthlyStatistics {
    let mut stats = MonthlyStatistics {
        sheet: sheet.to_string(),
        month,
        new_hires: 0,
        resignations: 0,
        active: 0,
        new_hires_by_category: CategoryBreakdown::default(),
        resignations_by_category: CategoryBreakdown::default(),
        active_by_category: CategoryBreakdown::default(),
    };

    for record in records {
        if record.hire_date == Some(month) {
            stats.new_hires += 1;
            stats.new_hires_by_category.bump(record.category);
        }
        if record.resign_date == Some(month) {
            stats.resignations += 1;
            stats.resignations_by_category.bump(record.category);
        }
        if is_active(record, month) {
            stats.active += 1;
            stats.active_by_category.bump(record.category);
        }
    }

    stats
}

/// Extends the roster accumulator with records hired or resigned in the
/// month preceding the processing date. Only records carrying a name
/// contribute a roster row.
pub fn collect_roster(
    records: &[EmployeeRecord],
    previous_month: Month,
    accumulator: &mut RosterAccumulator,
) {
    for record in records {
        let Some(name) = record.name.clone() else {
            continue;
        };
        let entry = RosterEntry {
            category: record.category,
            department: record.department.clone(),
            name,
            title: record.title.clone(),
            entity: record.entity.clone(),
        };
        if record.hire_date == Some(previous_month) {
            accumulator.new_hires.push(entry.clone());
        }
        if record.resign_date == Some(previous_month) {
            accumulator.resigned.push(entry);
        }
    }
}
