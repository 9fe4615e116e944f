//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "coding",
    version,
    about = "Inspect and serialize categorical codings",
    long_about = "Inspect categorical codings built from XLSForm choice lists.\n\n\
                  Prints codings as tables, serializes them to single-line text,\n\
                  and evaluates stored text back into codings."
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

    /// Log output format.
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
    /// List the choice lists in an XLSForm choices CSV.
    Lists(ChoicesArgs),

    /// Print codings built from an XLSForm choices CSV.
    Show(ChoicesArgs),

    /// Print each coding as a single-line text expression.
    Serialize(SerializeArgs),

    /// Evaluate a text expression and print the resulting coding.
    Eval(EvalArgs),
}

#[derive(Args)]
pub struct ChoicesArgs {
    /// Path to a CSV export of the XLSForm `choices` sheet.
    #[arg(value_name = "CHOICES_CSV")]
    pub choices: PathBuf,

    /// Only use the choice list with this `list_name`.
    #[arg(long = "list-name", value_name = "NAME")]
    pub list_name: Option<String>,
}

#[derive(Args)]
pub struct SerializeArgs {
    #[command(flatten)]
    pub choices: ChoicesArgs,

    /// Include recoding lineage (`links_from`) in the output.
    #[arg(long = "links-from")]
    pub links_from: bool,
}

#[derive(Args)]
pub struct EvalArgs {
    /// A `coding(...)` expression.
    #[arg(value_name = "EXPR")]
    pub expr: String,
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
