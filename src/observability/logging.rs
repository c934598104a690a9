//! Tracing subscriber setup
//!
//! Installed once per process by the CLI. The level string is an
//! `EnvFilter` directive (`info`, `agridrone_query=debug,tower_http=info`).
//! Output goes to stderr so one-shot commands keep stdout for results.

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Installs the global subscriber. `json` switches to one JSON object per line.
pub fn init_logging(level: &str, json: bool) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;

    let installed = if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .try_init()
    };

    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel(e.to_string()))
}
