use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use roster_tools::config::{self, MergeConfig};
use roster_tools::merge::{self, MergeReport};
use roster_tools::model::Month;
use roster_tools::{MergeError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Merge(args) => execute_merge(args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| MergeError::Logging(error.to_string()))
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    for input in &args.inputs {
        if !input.exists() {
            return Err(MergeError::MissingInput(input.clone()));
        }
    }

    match args.mode {
        MergeMode::Analysis => {
            let month = args
                .month
                .as_deref()
                .map(|raw| {
                    raw.parse::<Month>()
                        .map_err(|()| MergeError::InvalidMonth(raw.to_string()))
                })
                .transpose()?;
            let keywords = config::parse_keywords(
                args.keywords
                    .as_deref()
                    .unwrap_or(config::DEFAULT_REDACTION_KEYWORDS),
            );
            let merge_config = MergeConfig::for_today(month, keywords);
            let report = merge::merge_analysis(&args.inputs, &args.output, &merge_config)?;
            print_report(&report);
            if let Some(path) = &args.report {
                let json = serde_json::to_string_pretty(&report.statistics)?;
                std::fs::write(path, json)?;
            }
            Ok(())
        }
        MergeMode::Styled => merge::merge_styled(&args.inputs, &args.output),
    }
}

/// Prints the six per-sheet statistic blocks plus the redaction audit.
fn print_report(report: &MergeReport) {
    for (sheet, removed) in &report.removed_columns {
        println!("[{sheet}] 삭제된 컬럼: {}", removed.join(", "));
    }

    for stats in &report.statistics {
        let month = stats.month;
        println!();
        println!("시트 이름: {}", stats.sheet);
        println!("1. {month} 입사자 수: {}명", stats.new_hires);
        println!("2. {month} 퇴사자 수: {}명", stats.resignations);
        println!("3. {month} 기준 총 재직자 수: {}명", stats.active);
        println!("4. {month} 입사자 수 (사원구분별)");
        for (category, count) in stats.new_hires_by_category.iter() {
            println!("  - {}: {}명", category.label(), count);
        }
        println!("5. {month} 퇴사자 수 (사원구분별)");
        for (category, count) in stats.resignations_by_category.iter() {
            println!("  - {}: {}명", category.label(), count);
        }
        println!("6. {month} 기준 총 재직자 수 (사원구분별)");
        for (category, count) in stats.active_by_category.iter() {
            println!("  - {}: {}명", category.label(), count);
        }
    }

    for skipped in &report.skipped_files {
        println!("건너뛴 파일: {}", skipped.display());
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge HR roster workbooks and compute monthly headcount statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge one or more xlsx files into a single workbook.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Input xlsx files to merge.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    /// Merge mode.
    #[arg(long, value_enum, default_value_t = MergeMode::Analysis)]
    mode: MergeMode,

    /// Reference month (YYYY-MM) for the statistics; defaults to the month
    /// preceding today.
    #[arg(long)]
    month: Option<String>,

    /// Comma-separated keywords; matching columns are removed.
    #[arg(long)]
    keywords: Option<String>,

    /// Optional path for a JSON dump of the per-sheet statistics.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MergeMode {
    /// Normalize, redact, and compute headcount statistics.
    Analysis,
    /// Copy sheets verbatim with their formatting preserved.
    Styled,
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMode::Analysis => write!(f, "analysis"),
            MergeMode::Styled => write!(f, "styled"),
        }
    }
}
