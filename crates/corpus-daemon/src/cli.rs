//! CLI argument parsing.
//!
//! CLI flags override every other configuration source.

use clap::{Parser, Subcommand};

/// Semantic corpus tools
///
/// Embedding service, corpus seeder, consistency auditor and readiness
/// verifier for a semantic-search document store.
#[derive(Parser, Debug)]
#[command(name = "corpus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/semantic-corpus/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP embedding service
    Serve {
        /// Override service port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override bind address
        #[arg(long)]
        host: Option<String>,
    },

    /// Load the built-in corpus with embeddings into the store
    Seed {
        /// Keep existing documents instead of clearing the collection first
        #[arg(long)]
        no_clear: bool,
    },

    /// Report which stored documents have usable embeddings
    Audit,

    /// Check toolchain, configuration, store and model readiness
    Verify,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_serve_with_port() {
        let cli = Cli::parse_from(["corpus", "serve", "-p", "6001"]);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(6001));
                assert_eq!(host, None);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_seed_clears_by_default() {
        let cli = Cli::parse_from(["corpus", "seed"]);
        assert!(matches!(cli.command, Commands::Seed { no_clear: false }));

        let cli = Cli::parse_from(["corpus", "seed", "--no-clear"]);
        assert!(matches!(cli.command, Commands::Seed { no_clear: true }));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["corpus", "audit", "--config", "/etc/corpus.toml", "-l", "debug"]);
        assert!(matches!(cli.command, Commands::Audit));
        assert_eq!(cli.config, Some("/etc/corpus.toml".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_verify() {
        let cli = Cli::parse_from(["corpus", "verify"]);
        assert!(matches!(cli.command, Commands::Verify));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["corpus"]).is_err());
    }
}
