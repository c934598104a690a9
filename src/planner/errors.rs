//! Query error types
//!
//! Two kinds only:
//! - `Validation`: the caller supplied bad or missing input. Always detected
//!   before the store is touched; never retried.
//! - `Internal`: the store or transport failed. Surfaced as-is, never retried.

use thiserror::Error;

use crate::store::StoreError;

/// Query error kind tag, as written into response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    Validation,
    Internal,
}

impl QueryErrorKind {
    /// Returns the string code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorKind::Validation => "ValidationError",
            QueryErrorKind::Internal => "InternalServerError",
        }
    }

    /// HTTP status code for this kind
    pub fn status(&self) -> u16 {
        match self {
            QueryErrorKind::Validation => 400,
            QueryErrorKind::Internal => 500,
        }
    }
}

/// Query error with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl QueryError {
    /// Missing required parameter
    pub fn missing_param(name: &str) -> Self {
        QueryError::Validation(format!("Missing required parameter: {}", name))
    }

    /// Parameter present but not parseable as its declared kind
    pub fn invalid_param(name: &str, expected: &str) -> Self {
        QueryError::Validation(format!(
            "Invalid parameter format: {} must be {}",
            name, expected
        ))
    }

    pub fn kind(&self) -> QueryErrorKind {
        match self {
            QueryError::Validation(_) => QueryErrorKind::Validation,
            QueryError::Internal(_) => QueryErrorKind::Internal,
        }
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        match self {
            QueryError::Validation(m) | QueryError::Internal(m) => m,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == QueryErrorKind::Validation
    }
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        QueryError::Internal(err.to_string())
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(QueryErrorKind::Validation.code(), "ValidationError");
        assert_eq!(QueryErrorKind::Internal.code(), "InternalServerError");
        assert_eq!(QueryErrorKind::Validation.status(), 400);
        assert_eq!(QueryErrorKind::Internal.status(), 500);
    }

    #[test]
    fn test_missing_param_message() {
        let err = QueryError::missing_param("farm_id");
        assert!(err.is_validation());
        assert_eq!(err.message(), "Missing required parameter: farm_id");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err: QueryError = StoreError::TableNotFound("t".into()).into();
        assert_eq!(err.kind(), QueryErrorKind::Internal);
        assert!(err.message().contains("Table not found"));
    }
}
