//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value and blob store errors.
///
/// The query path does not distinguish between these: every variant surfaces
/// to callers as an internal error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Index not found: {index} on table {table}")]
    IndexNotFound { table: String, index: String },

    #[error("Record missing key attribute '{attribute}' for table {table}")]
    MissingKeyAttribute { table: String, attribute: String },

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
