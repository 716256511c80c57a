//! CLI argument definitions for the GridTalk board toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gridtalk",
    version,
    about = "GridTalk - build and check grid-based AAC communication boards",
    long_about = "Work with grid-based AAC (Augmentative and Alternative Communication)\n\
                  boards stored as JSON: scaffold a starter board, inspect its pages\n\
                  and buttons, and validate grid layout and link targets."
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
    /// Write a starter single-page board file.
    New(NewArgs),

    /// Show a board's pages, buttons and actions.
    Inspect(InspectArgs),

    /// Check a board's layout invariants and link targets.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct NewArgs {
    /// Where to write the board JSON.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Board name.
    #[arg(long = "name", default_value = "New board")]
    pub name: String,

    /// Grid rows.
    #[arg(long = "rows", default_value_t = 3)]
    pub rows: u32,

    /// Grid columns.
    #[arg(long = "cols", default_value_t = 3)]
    pub cols: u32,

    /// Overwrite an existing file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Board JSON file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Board JSON file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Emit the audit report as JSON instead of a table.
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
