//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;
use crate::logging::LogFormat;

/// Command-line interface for the vocalis text-to-speech server.
#[derive(Parser, Debug)]
#[command(name = "vocalis")]
#[command(about = "Serve voice-cloned text-to-speech over HTTP")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "VOCALIS_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
