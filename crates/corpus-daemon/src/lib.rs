//! Semantic corpus CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (serve, seed, audit, verify)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    audit_report, load_session, run_audit_command, run_seed_command, run_verify_command,
    seed_report, serve, verify_report,
};
