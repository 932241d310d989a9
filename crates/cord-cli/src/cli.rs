//! CLI argument definitions for the metadata analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cord-metadata",
    version,
    about = "CORD-19 metadata analyzer - load, clean, and aggregate paper metadata",
    long_about = "Analyze a CORD-19 metadata CSV file.\n\n\
                  Loads the file with a configurable row cap, cleans missing values\n\
                  and publication dates, derives per-paper features, and prints\n\
                  year counts, top journals and sources, and abstract statistics."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a metadata CSV file and print a summary.
    Analyze(AnalyzeArgs),

    /// List the recognized metadata columns and their cleaning policies.
    Columns,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the metadata CSV file.
    #[arg(value_name = "METADATA_CSV")]
    pub metadata: PathBuf,

    /// Load at most this many data rows.
    #[arg(long = "limit", value_name = "ROWS")]
    pub limit: Option<usize>,

    /// Keep only papers published in or after this year.
    #[arg(long = "year-from", value_name = "YEAR")]
    pub year_from: Option<i32>,

    /// Keep only papers published in or before this year.
    #[arg(long = "year-to", value_name = "YEAR")]
    pub year_to: Option<i32>,

    /// Keep only papers from this source (repeatable).
    #[arg(long = "source", value_name = "SOURCE")]
    pub source: Vec<String>,

    /// Number of entries in the top-journal and top-source rankings.
    #[arg(long = "top-n", value_name = "N", default_value_t = 10)]
    pub top_n: usize,

    /// Export the filtered records as CSV to this path.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Print the analysis result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
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
