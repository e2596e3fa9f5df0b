//! CLI argument definitions for hist2json.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hist_ingest::DEFAULT_UNICORN_PATH;

#[derive(Parser)]
#[command(
    name = "hist2json",
    version,
    about = "Convert SirsiDynix Symphony history logs to JSON",
    long_about = "Convert SirsiDynix Symphony history logs to JSON.\n\n\
                  Command and data codes are translated to readable names, dates are\n\
                  normalized, user PINs are redacted and item keys are replaced by\n\
                  item barcodes when a barcode list is given."
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

    /// Allow raw history lines in trace logs. They contain patron data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert hist files to JSON.
    Convert(ConvertArgs),

    /// List the command and data codes that would be used.
    Codes(SourceArgs),
}

/// Code table locations shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Unicorn directory holding Custom/ and Log/Hist.
    #[arg(short = 'U', long = "unicorn-path", value_name = "DIR", default_value = DEFAULT_UNICORN_PATH)]
    pub unicorn_path: PathBuf,

    /// Command code file (default: <UNICORN>/Custom/cmdcode).
    #[arg(short = 'C', long = "cmd-codes", value_name = "FILE")]
    pub cmd_codes: Option<PathBuf>,

    /// Data code file (default: <UNICORN>/Custom/datacode).
    #[arg(short = 'D', long = "data-codes", value_name = "FILE")]
    pub data_codes: Option<PathBuf>,

    /// JSON object mapping client type numbers to names.
    #[arg(short = 'c', long = "client-codes", value_name = "FILE")]
    pub client_codes: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Hist file to convert; repeatable. Names not found as given are looked
    /// up in <UNICORN>/Log/Hist.
    #[arg(short = 'H', long = "hist-file", value_name = "FILE")]
    pub hist_files: Vec<PathBuf>,

    /// Convert every hist file in <UNICORN>/Log/Hist.
    #[arg(long = "all")]
    pub all: bool,

    /// `selitem -oIB` output used to turn item keys into barcodes.
    #[arg(short = 'I', long = "item-barcodes", value_name = "FILE")]
    pub item_barcodes: Option<PathBuf>,

    /// Directory for <hist-stem>.json files.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = ".",
        conflicts_with = "stdout"
    )]
    pub output_dir: PathBuf,

    /// Write JSON to stdout instead of files. The summary goes to stderr.
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// One JSON object per line, as mongoimport expects.
    #[arg(short = 'm', long = "mongo")]
    pub mongo: bool,
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
