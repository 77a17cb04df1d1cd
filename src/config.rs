use chrono::NaiveDate;

use crate::model::Month;

/// Sentinel value marking the header row inside a worksheet.
pub const HEADER_SENTINEL: &str = "No";

/// Canonical hire-date column name.
pub const HIRE_DATE_COLUMN: &str = "입사일";
/// Canonical resignation-date column name.
pub const RESIGN_DATE_COLUMN: &str = "퇴사일";
/// Legacy hire-date column name used by some entities.
pub const LEGACY_HIRE_DATE_COLUMN: &str = "Starting Date";
/// Employee category column name.
pub const CATEGORY_COLUMN: &str = "사원구분명";
/// Person name column name.
pub const NAME_COLUMN: &str = "성명";
/// English person name column name.
pub const ENGLISH_NAME_COLUMN: &str = "English Name";
/// Department column name.
pub const DEPARTMENT_COLUMN: &str = "부서명";
/// Job title column name.
pub const TITLE_COLUMN: &str = "직급명";
/// Free-text remark column name.
pub const REMARK_COLUMN: &str = "Remark";
/// Contract type column used to derive the category.
pub const CONTRACT_TYPE_COLUMN: &str = "Contract Type";

/// Remark prefix marking a person who resigned at the end of last month.
pub const RESIGNED_REMARK_PREFIX: &str = "Resigned and last working";

/// Sheet name of the synthetic new-hires summary.
pub const NEW_HIRES_SHEET: &str = "입사자_리스트";
/// Sheet name of the synthetic resignations summary.
pub const RESIGNED_SHEET: &str = "퇴사자_리스트";

/// Maximum sheet name length imposed by the xlsx format.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Default comma-separated redaction keywords (resident-ID, career
/// history, and certification related columns).
pub const DEFAULT_REDACTION_KEYWORDS: &str = "주민, 경력, 인정";

/// Columns that receive the YYYY-MM-DD display format in the output.
pub const DATE_COLUMNS: [&str; 2] = [HIRE_DATE_COLUMN, RESIGN_DATE_COLUMN];

/// Fixed ordering of known entities; output sheets follow this sequence.
/// Files whose stem is not listed sort after all listed entities.
pub const ENTITY_ORDER: [&str; 15] = [
    "도이치아우토",
    "브리티시오토",
    "바이에른오토",
    "이탈리아오토모빌리",
    "브리타니아오토",
    "디티네트웍스",
    "DT네트웍스",
    "도이치파이낸셜",
    "BAMC",
    "차란차",
    "디티이노베이션",
    "DT이노베이션",
    "도이치오토월드",
    "DAFS",
    "사직오토랜드",
];

/// Per-entity denylist of person names excluded from every output.
const ENTITY_EXCLUSIONS: [(&str, &[&str]); 4] = [
    ("도이치오토월드", &["장준호"]),
    ("DT네트웍스", &["권혁민"]),
    ("디티네트웍스", &["권혁민"]),
    ("BAMC", &["YOON JONG LYOL"]),
];

/// Sort rank of an entity name; unlisted entities rank last.
pub fn entity_rank(entity: &str) -> usize {
    ENTITY_ORDER
        .iter()
        .position(|known| *known == entity)
        .unwrap_or(ENTITY_ORDER.len())
}

/// Denylisted person names for the given entity, empty when none apply.
/// Scoped strictly to the entity asked about.
pub fn exclusions_for(entity: &str) -> &'static [&'static str] {
    ENTITY_EXCLUSIONS
        .iter()
        .find(|(known, _)| *known == entity)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Splits a comma-separated keyword string, dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run-scoped configuration for one merge session. The reference dates are
/// computed once from the processing date, never per row.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Month the headcount statistics are computed for.
    pub selected_month: Month,
    /// Month preceding the processing date; drives the summary rosters and
    /// the remark-based resignation rule.
    pub previous_month: Month,
    /// Last calendar day of `previous_month`.
    pub previous_month_last_day: NaiveDate,
    /// Redaction keywords applied to column names.
    pub keywords: Vec<String>,
}

impl MergeConfig {
    /// Builds a configuration for the given processing date. A missing
    /// selected month defaults to the month preceding that date.
    pub fn new(today: NaiveDate, selected_month: Option<Month>, keywords: Vec<String>) -> Self {
        let previous_month = Month::containing(today).pred();
        Self {
            selected_month: selected_month.unwrap_or(previous_month),
            previous_month,
            previous_month_last_day: previous_month.last_day(),
            keywords,
        }
    }

    /// Builds a configuration anchored at the current local date.
    pub fn for_today(selected_month: Option<Month>, keywords: Vec<String>) -> Self {
        Self::new(chrono::Local::now().date_naive(), selected_month, keywords)
    }
}
