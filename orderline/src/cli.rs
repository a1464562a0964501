//! CLI argument parsing for orderline

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::events::OutputFormat;

/// Orderline - round-robin order line simulator
#[derive(Parser, Debug)]
#[command(name = "orderline")]
#[command(author, version, about = "Round-robin order line simulator", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Event output format (text, json); overrides the config file
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Subcommand to execute (default: session on stdin)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command session
    Session {
        /// Script of commands to run instead of stdin
        script: Option<PathBuf>,
    },

    /// Print the menu
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["orderline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_session_with_script_and_format() {
        let cli = Cli::try_parse_from(["orderline", "session", "orders.txt", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Some(Command::Session { script }) => assert_eq!(script, Some(PathBuf::from("orders.txt"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["orderline", "--format", "xml"]).is_err());
    }
}
