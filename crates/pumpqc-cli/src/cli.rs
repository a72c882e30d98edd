//! CLI argument definitions for the pump test analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pumpqc",
    version,
    about = "Pump test QC analyzer - classify, match, and report pump test data",
    long_about = "Analyze pump test data exported as CSV sheets.\n\n\
                  Classifies each sheet as Single or Tandem configuration, pairs\n\
                  tandem P1/P2 records, computes amperage and efficiency statistics,\n\
                  and flags tandem pairs outside matching tolerances."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a CSV file or a folder of CSV sheets.
    Analyze(AnalyzeArgs),

    /// List the recognized column name aliases.
    Columns,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// CSV file (one sheet) or folder of CSV files (one sheet per file).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the written QC report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print machine-readable JSON summaries instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Merge sheets of the same configuration into one summary.
    #[arg(long = "merge")]
    pub merge: bool,

    /// Customer name for the report header.
    #[arg(long = "customer", value_name = "NAME")]
    pub customer: Option<String>,

    /// Order number for the report header.
    #[arg(long = "order-no", value_name = "NO")]
    pub order_no: Option<String>,

    /// Maximum P1/P2 amperage difference in percent before a tandem unit is
    /// flagged (default 10).
    #[arg(long = "amp-tolerance", value_name = "PCT")]
    pub amp_tolerance: Option<f64>,

    /// Maximum P1/P2 efficiency difference in percent before a tandem unit
    /// is flagged (default 3).
    #[arg(long = "eff-tolerance", value_name = "PCT")]
    pub eff_tolerance: Option<f64>,

    /// Exit nonzero when any tandem unit is out of tolerance.
    #[arg(long = "fail-on-mismatch")]
    pub fail_on_mismatch: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
