//! CLI error types
//!
//! Every CLI error ends the process. Each kind maps to its own exit code so
//! scripts can tell a bad config from a rejected query.

use std::io;

use thiserror::Error;

/// What went wrong, at the granularity of an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Config file unreadable or invalid
    ConfigError,
    /// stdout or seed file I/O
    IoError,
    /// Runtime, store or listener could not start
    BootFailed,
    /// One-shot query answered with an error status
    QueryFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::IoError => "CLI_IO_ERROR",
            Self::BootFailed => "CLI_BOOT_FAILED",
            Self::QueryFailed => "CLI_QUERY_FAILED",
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::QueryFailed => 1,
            Self::ConfigError => 2,
            Self::IoError => 3,
            Self::BootFailed => 4,
        }
    }
}

/// CLI error: a code plus a human-readable message
#[derive(Debug, Error)]
#[error("{}: {message}", .code.code())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Query answered with a non-200 status
    pub fn query_failed(status: u16) -> Self {
        Self::new(
            CliErrorCode::QueryFailed,
            format!("query returned status {}", status),
        )
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(err.to_string(), "CLI_CONFIG_ERROR: port must be > 0");
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_query_failed_message() {
        let err = CliError::query_failed(400);
        assert_eq!(err.code_str(), "CLI_QUERY_FAILED");
        assert_eq!(err.message(), "query returned status 400");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert_eq!(err.code(), CliErrorCode::IoError);
        assert_eq!(err.message(), "stdout closed");
    }
}
