//! Command-line interface for strictly_stakes.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Stakes - escrowed tic-tac-toe host
#[derive(Parser, Debug)]
#[command(name = "strictly_stakes")]
#[command(about = "Escrowed tic-tac-toe with per-turn deadlines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP escrow server
    Serve {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "strictly_stakes.toml")]
        config: PathBuf,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a scripted game on a manual clock and print its events
    Demo {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "strictly_stakes.toml")]
        config: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["strictly_stakes", "serve", "--port", "8080"]);
        match cli.command {
            Command::Serve { config, host, port } => {
                assert_eq!(config, PathBuf::from("strictly_stakes.toml"));
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_demo() {
        let cli = Cli::parse_from(["strictly_stakes", "demo", "-c", "alt.toml"]);
        assert!(matches!(
            cli.command,
            Command::Demo { config } if config == PathBuf::from("alt.toml")
        ));
    }
}
