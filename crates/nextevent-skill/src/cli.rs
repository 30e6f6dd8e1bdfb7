//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// nextevent - What's next on the City of Plano calendar
#[derive(Debug, Parser)]
#[command(name = "nextevent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NEXTEVENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer one skill request (JSON) and print the response
    Handle {
        /// Read the request from this file instead of stdin
        #[arg(long, short)]
        request: Option<PathBuf>,
    },

    /// Show the next event of a calendar
    Next {
        /// Calendar name
        #[arg(long, default_value = "Meetings")]
        calendar: String,

        /// Read the feed from this file instead of fetching it
        #[arg(long)]
        feed_file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = NextFormat::Text)]
        format: NextFormat,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Output formats for `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NextFormat {
    /// Human-readable summary
    Text,
    /// The SSML the skill would speak
    Ssml,
    /// The entry as JSON
    Json,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
