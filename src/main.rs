//! Command line entry point for the attendance payroll processor.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendance_payroll::config::{ConfigLoader, PayrollConfig};
use attendance_payroll::pipeline::process_attendance;
use attendance_payroll::spreadsheet::{
    DEFAULT_DELIMITER, JSON_REPORT_FILE, WORKBOOK_FILE, read_table, write_csv_workbook,
    write_json_report, write_xlsx_workbook,
};

/// Output layout for the processed report.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One spreadsheet workbook with a worksheet per sheet.
    Xlsx,
    /// One CSV file per sheet.
    Csv,
    /// A single JSON document including the audit trace.
    Json,
}

/// Reconcile a biometric attendance export into daily and monthly payroll reports.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Attendance export (.xlsx, .xls, .ods or delimited text) with Name, Emp ID,
    /// Time and Attendance State columns.
    input: PathBuf,

    /// YAML payroll configuration; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the report is written to.
    #[arg(short, long, default_value = "processed_attendance")]
    output: PathBuf,

    /// Output layout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,

    /// Field delimiter when the input is delimited text.
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER as char)]
    delimiter: char,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!(error = %format!("{:#}", err), "Processing failed");
        return Err(err);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?.into_config(),
        None => PayrollConfig::default(),
    };

    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{}' is not a single ASCII character", cli.delimiter))?;

    let table = read_table(&cli.input, delimiter)?;
    let report = process_attendance(&table, &config)
        .with_context(|| format!("Could not process {}", cli.input.display()))?;

    match cli.format {
        OutputFormat::Xlsx => {
            let path = cli.output.join(WORKBOOK_FILE);
            write_xlsx_workbook(&report, &path)?;
            info!(path = %path.display(), "Workbook ready");
        }
        OutputFormat::Csv => {
            let written = write_csv_workbook(&report, &cli.output)?;
            for path in written {
                info!(path = %path.display(), "Sheet ready");
            }
        }
        OutputFormat::Json => {
            write_json_report(&report, &cli.output.join(JSON_REPORT_FILE))?;
        }
    }

    info!(
        employees = report.summaries.len(),
        excluded_rows = report.excluded_rows,
        "Report generated"
    );
    Ok(())
}
