//! CLI argument definitions for the submission metadata validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "seqsub",
    version,
    about = "Validate tab-separated sequence submission metadata",
    long_about = "Validate tab-separated sequence submission metadata.\n\n\
                  Resolves the submission identifier header (including its legacy\n\
                  spelling) and checks every row, stopping at the first invalid one."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a metadata file and summarize its entries.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the tab-separated metadata file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the file as a revision of accessioned records (requires an accession column).
    #[arg(long = "revision")]
    pub revision: bool,

    /// Read sequence file linkage from the fasta id column.
    #[arg(long = "fasta-ids")]
    pub fasta_ids: bool,

    /// How to report the result.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Summary table.
    Table,
    /// One JSON object per entry.
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
