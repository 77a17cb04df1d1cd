use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single spreadsheet cell as produced by the value reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Cell with no content.
    Empty,
    /// Plain text content.
    Text(String),
    /// Numeric content; integers are carried as floats with zero fraction.
    Number(f64),
    /// Boolean content.
    Boolean(bool),
    /// Date or datetime content.
    Date(NaiveDateTime),
}

impl CellValue {
    /// Returns true when the cell carries no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Renders the cell the way it would appear to a reader. Integral
    /// numbers drop their fractional part.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            CellValue::Boolean(value) => value.to_string(),
            CellValue::Date(value) => value.date().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Raw grid of cells read from one worksheet, before any table discovery.
#[derive(Debug, Clone)]
pub struct RawSheet {
    /// Worksheet name as stored in the source workbook.
    pub name: String,
    /// Rows of cells, anchored at A1 (leading empty rows/columns padded).
    pub rows: Vec<Vec<CellValue>>,
}

/// Tabular data located inside a worksheet: a header row plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Month-precision date. Ordering and equality follow the calendar, which
/// for the `YYYY-MM` rendering coincides with lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// Builds the month containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month immediately before this one.
    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month immediately after this one.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Last calendar day of this month.
    pub fn last_day(self) -> NaiveDate {
        let next = self.succ();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .expect("first day of a valid month")
            .pred_opt()
            .expect("month has a predecessor day")
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (year, month) = value.trim().split_once('-').ok_or(())?;
        let year: i32 = year.parse().map_err(|_| ())?;
        let month: u32 = month.parse().map_err(|_| ())?;
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(())
        }
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Employment category of a record, displayed with its Korean label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmployeeCategory {
    #[serde(rename = "임원")]
    Executive,
    #[serde(rename = "정규직")]
    Regular,
    #[serde(rename = "계약직")]
    Contract,
    #[serde(rename = "파견직")]
    Dispatched,
}

impl EmployeeCategory {
    /// Fixed order used whenever per-category counts are reported.
    pub const DISPLAY_ORDER: [EmployeeCategory; 4] = [
        EmployeeCategory::Executive,
        EmployeeCategory::Regular,
        EmployeeCategory::Contract,
        EmployeeCategory::Dispatched,
    ];

    /// Korean label as it appears in source workbooks.
    pub fn label(self) -> &'static str {
        match self {
            EmployeeCategory::Executive => "임원",
            EmployeeCategory::Regular => "정규직",
            EmployeeCategory::Contract => "계약직",
            EmployeeCategory::Dispatched => "파견직",
        }
    }

    /// Parses a source label; unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "임원" => Some(EmployeeCategory::Executive),
            "정규직" => Some(EmployeeCategory::Regular),
            "계약직" => Some(EmployeeCategory::Contract),
            "파견직" => Some(EmployeeCategory::Dispatched),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::DISPLAY_ORDER
            .iter()
            .position(|category| *category == self)
            .expect("category present in display order")
    }
}

/// One normalized employee row. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    /// Source identifier (input file stem) the record came from.
    pub entity: String,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub category: Option<EmployeeCategory>,
    /// Hire month; unparseable source dates coerce to `None`.
    pub hire_date: Option<Month>,
    /// Resignation month; `None` while still employed.
    pub resign_date: Option<Month>,
    /// Columns not covered by the known field set, kept for fidelity.
    pub extra: BTreeMap<String, String>,
}

/// Counts per employee category in the fixed display order, zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryBreakdown([u64; 4]);

impl CategoryBreakdown {
    /// Counts a record toward its category; uncategorized records are
    /// ignored here and only contribute to the unbroken-down total.
    pub fn bump(&mut self, category: Option<EmployeeCategory>) {
        if let Some(category) = category {
            self.0[category.index()] += 1;
        }
    }

    pub fn get(&self, category: EmployeeCategory) -> u64 {
        self.0[category.index()]
    }

    /// Sum over the four fixed categories.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Iterates (category, count) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EmployeeCategory, u64)> + '_ {
        EmployeeCategory::DISPLAY_ORDER
            .iter()
            .map(|category| (*category, self.get(*category)))
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.label(), &count)?;
        }
        map.end()
    }
}

/// Per-sheet headcount statistics for one reference month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStatistics {
    pub sheet: String,
    pub month: Month,
    pub new_hires: u64,
    pub resignations: u64,
    pub active: u64,
    pub new_hires_by_category: CategoryBreakdown,
    pub resignations_by_category: CategoryBreakdown,
    pub active_by_category: CategoryBreakdown,
}

/// One row of the synthetic "new hires" / "resigned" summary sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub category: Option<EmployeeCategory>,
    pub department: Option<String>,
    pub name: String,
    pub title: Option<String>,
    /// Source sheet the person appeared on.
    pub entity: String,
}

/// Accumulates previous-month hires and resignations across all sheets.
/// Threaded through sheet processing as a value; the orchestrator owns it.
#[derive(Debug, Clone, Default)]
pub struct RosterAccumulator {
    pub new_hires: Vec<RosterEntry>,
    pub resigned: Vec<RosterEntry>,
}

impl RosterAccumulator {
    pub fn is_empty(&self) -> bool {
        self.new_hires.is_empty() && self.resigned.is_empty()
    }
}
