//! CLI argument definitions for the KAERS extract converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kaers-convert",
    version,
    about = "KAERS Extract Converter - Normalize adverse event extracts for submission",
    long_about = "Convert pipe-delimited KAERS adverse event extracts into a\n\
                  normalized submission workbook and a narrative summary workbook.\n\
                  Coded values are translated against the reference code tables."
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
    /// Convert a batch of extract files into the submission workbooks.
    Convert(ConvertArgs),

    /// List the recognized extract table names.
    Tables,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Directory containing the pipe-delimited extract files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory containing the reference code tables (default: <INPUT_DIR>/codes).
    #[arg(long = "codes-dir", value_name = "DIR")]
    pub codes_dir: Option<PathBuf>,

    /// Path of the submission workbook (default: <INPUT_DIR>/submission.xlsx).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path of the narrative workbook (default: <INPUT_DIR>/narrative.xlsx).
    #[arg(long = "narrative-output", value_name = "PATH")]
    pub narrative_output: Option<PathBuf>,

    /// Skip narrative assembly and its workbook.
    #[arg(long = "no-narrative")]
    pub no_narrative: bool,

    /// Run the conversion and report without writing workbooks.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
