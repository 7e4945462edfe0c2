//! CLI argument definitions for the table viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tableview",
    version,
    about = "Filter and page through record tables",
    long_about = "Filter and page through record tables.\n\n\
                  Filters are declared in a TOML or JSON view document; records are\n\
                  read from a JSON array or a CSV file with a header row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Include search text and record values in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply filters to a record file and print one page.
    Show(ShowArgs),

    /// List the filters a view document declares.
    Filters(FiltersArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// View document with page size and filter definitions (TOML or JSON).
    #[arg(long = "filters", value_name = "FILE")]
    pub filters: PathBuf,

    /// Records to display (JSON array or CSV).
    #[arg(long = "records", value_name = "FILE")]
    pub records: PathBuf,

    /// Rows per page (overrides the view document).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<std::num::NonZeroUsize>,

    /// 1-based page to print; out-of-range values are clamped.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Text for the search filter.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Set a filter by label, e.g. `--set "Device type=Solar,Wind"`.
    ///
    /// Multiselect values are comma separated. Repeat for several filters;
    /// later values for the same label win.
    #[arg(long = "set", value_name = "LABEL=VALUE")]
    pub set: Vec<String>,

    /// Output format for the page.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct FiltersArgs {
    /// View document with filter definitions (TOML or JSON).
    #[arg(long = "filters", value_name = "FILE")]
    pub filters: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
