//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BoatGPT - multi-instance chat engine with a vision-fed data store
#[derive(Parser)]
#[command(
    name = "boatgpt",
    about = "Multi-instance chat engine with a vision-fed data store",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive session (default)
    Repl,

    /// One-shot stateless question to an instance
    Quick {
        /// Instance id
        #[arg(value_name = "ID")]
        id: String,

        /// Question text
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["boatgpt"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_quick_collects_text_words() {
        let cli = Cli::try_parse_from(["boatgpt", "quick", "npc1", "where", "is", "the", "harbor"]).unwrap();
        match cli.command {
            Some(Command::Quick { id, text }) => {
                assert_eq!(id, "npc1");
                assert_eq!(text.join(" "), "where is the harbor");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["boatgpt", "--log-level", "DEBUG", "repl"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("DEBUG"));
        assert!(matches!(cli.command, Some(Command::Repl)));
    }
}
