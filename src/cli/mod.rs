//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - query: One-shot query execution
//! - explain: One-shot explain, no store access

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{parse_param, Cli, Command};
pub use commands::{build_state, explain, query, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_raw};
