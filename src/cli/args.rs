//! CLI argument definitions using clap
//!
//! Commands:
//! - agridrone-query serve --config <path> [--port <port>]
//! - agridrone-query query --config <path> <collection> [key=value ...]
//! - agridrone-query explain --config <path> <collection> [key=value ...]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read API over drone flights, CV results and sensor readings
#[derive(Parser, Debug)]
#[command(name = "agridrone-query")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./agridrone.json")]
        config: PathBuf,

        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Execute a single query and print the response body
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./agridrone.json")]
        config: PathBuf,

        /// Collection name (cv-results, flights, sensor-data)
        collection: String,

        /// Query parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Print the plan a query would run, without reading the store
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./agridrone.json")]
        config: PathBuf,

        /// Collection name (cv-results, flights, sensor-data)
        collection: String,

        /// Query parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Splits `key=value` at the first `=`. The value may be empty.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}
