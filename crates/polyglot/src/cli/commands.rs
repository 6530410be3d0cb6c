//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Polyglot - language-tutor relay with ordered model fallback
#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(about = "Language-tutor relay with ordered model fallback", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (replaces ./polyglot.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the chat relay over HTTP
    Serve {
        /// Address to listen on, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Send one message through the fallback order and print the reply
    Ask {
        /// The student's message
        message: String,
    },

    /// Show the configured fallback order and backoff schedule
    Models,
}

impl Cli {
    /// Whether logs should be JSON formatted.
    pub fn json_logs(&self) -> bool {
        matches!(self.command, Commands::Serve { json_logs: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "polyglot",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--json-logs",
            "--config",
            "prod.toml",
        ])
        .unwrap();

        assert!(cli.json_logs());
        assert_eq!(cli.config, Some(PathBuf::from("prod.toml")));
        match cli.command {
            Commands::Serve { bind, .. } => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ask_takes_message() {
        let cli = Cli::try_parse_from(["polyglot", "-v", "ask", "Wie geht's?"]).unwrap();

        assert!(cli.verbose);
        assert!(!cli.json_logs());
        assert!(matches!(cli.command, Commands::Ask { ref message } if message == "Wie geht's?"));
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(Cli::try_parse_from(["polyglot", "ask"]).is_err());
    }

    #[test]
    fn test_models_command() {
        let cli = Cli::try_parse_from(["polyglot", "models"]).unwrap();
        assert!(matches!(cli.command, Commands::Models));
    }
}
