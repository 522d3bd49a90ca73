//! Semantic corpus command-line tool
//!
//! # Usage
//!
//! ```bash
//! corpus serve [--port PORT] [--host HOST]
//! corpus seed [--no-clear]
//! corpus audit
//! corpus verify
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/semantic-corpus/config.toml)
//! 3. Environment variables (CORPUS_*)
//! 4. CLI flags

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use corpus_daemon::{run_audit_command, run_seed_command, run_verify_command, serve, Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let log_level = cli.log_level.as_deref();

    let code = match cli.command {
        Commands::Serve { port, host } => {
            serve(config, log_level, port, host.as_deref()).await?;
            0
        }
        Commands::Seed { no_clear } => run_seed_command(config, log_level, no_clear)?,
        Commands::Audit => run_audit_command(config, log_level)?,
        Commands::Verify => run_verify_command(config, log_level)?,
    };

    Ok(ExitCode::from(code))
}
