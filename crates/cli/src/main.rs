//! # xlsim
//!
//! Command-line interface for pairwise spreadsheet similarity.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use xlsim_compare::{
    discover, CompareOptions, ExcessColoring, Execution, FileSource, MetricSet, MultiFileComparer,
    PairRecord, ResultTable, SheetPairing, Style, TableCell, TableOptions,
};

/// xlsim - find spreadsheets that look alike
#[derive(Parser)]
#[command(name = "xlsim")]
#[command(author, version, about = "Pairwise similarity of spreadsheet files", long_about = None)]
struct Cli {
    /// Files to compare, a directory, or a glob pattern
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Comma-separated metrics (meta, exact, string, geo)
    #[arg(short = 'm', long = "metrics", default_value = "meta,exact,string,geo")]
    metrics: MetricSet,

    /// Sheet combination reported by the exact and geo metrics
    #[arg(long = "sheet-pairing", default_value = "best")]
    sheet_pairing: PairingArg,

    /// Similarities above this are highlighted as a warning
    #[arg(long, default_value_t = 0.5)]
    low: f64,

    /// Similarities above this are highlighted as an alert
    #[arg(long, default_value_t = 0.8)]
    high: f64,

    /// Color zero excess as a warning instead of a success
    #[arg(long)]
    legacy_excess_colors: bool,

    /// Append results to this file instead of printing them
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Compare pairs in parallel
    #[arg(long)]
    parallel: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Aligned, colored table (default)
    #[default]
    Table,
    /// JSON array of pair records
    Json,
}

/// Sheet pairing policy.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum)]
enum PairingArg {
    /// Most similar sheet combination (default)
    #[default]
    Best,
    /// Least similar sheet combination
    Worst,
}

impl From<PairingArg> for SheetPairing {
    fn from(arg: PairingArg) -> Self {
        match arg {
            PairingArg::Best => SheetPairing::Best,
            PairingArg::Worst => SheetPairing::Worst,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    run(&cli)
}

/// Resolve the inputs, compare every pair and write the results.
fn run(cli: &Cli) -> Result<()> {
    let table_options = table_options(cli)?;

    let source = FileSource::from_inputs(&cli.inputs);
    let files = discover(&source).context("Failed to resolve input files")?;
    if files.len() < 2 {
        bail!(
            "Need at least two spreadsheet files to compare, found {}",
            files.len()
        );
    }
    tracing::debug!("Inputs resolved to {} file(s)", files.len());

    let execution = if cli.parallel {
        Execution::Parallel
    } else {
        Execution::Sequential
    };
    let mut multi = MultiFileComparer::new(files)
        .with_options(CompareOptions::default().with_pairing(cli.sheet_pairing.into()))
        .with_execution(execution);
    let records = multi.compare(&cli.metrics).context("Comparison failed")?;

    match (&cli.output, cli.format) {
        (Some(path), OutputFormat::Table) => {
            append_to_file(path, &ResultTable::build(records, &table_options).to_plain())
        }
        (Some(path), OutputFormat::Json) => append_to_file(path, &records_to_json(records)?),
        (None, OutputFormat::Table) => {
            print!("{}", ResultTable::build(records, &table_options).render(paint));
            Ok(())
        }
        (None, OutputFormat::Json) => {
            print!("{}", records_to_json(records)?);
            Ok(())
        }
    }
}

/// Table options from the threshold and coloring flags.
fn table_options(cli: &Cli) -> Result<TableOptions> {
    let excess_coloring = if cli.legacy_excess_colors {
        ExcessColoring::Legacy
    } else {
        ExcessColoring::Divergence
    };
    let options = TableOptions::default()
        .with_thresholds(cli.low, cli.high)?
        .with_excess_coloring(excess_coloring);
    Ok(options)
}

/// Color a table cell by its style.
fn paint(cell: &TableCell) -> String {
    match cell.style {
        Style::Plain => cell.text.clone(),
        Style::Alert => cell.text.red().to_string(),
        Style::Warning => cell.text.yellow().to_string(),
        Style::Success => cell.text.green().to_string(),
    }
}

/// Pretty JSON for a list of pair records, newline-terminated.
fn records_to_json(records: &[PairRecord]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Append text to a file, creating it if needed.
fn append_to_file(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
