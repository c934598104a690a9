//! Report errors

use thiserror::Error;

use crate::store::StoreError;

/// Report retrieval errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Bad or missing request input (400)
    #[error("{0}")]
    Validation(String),

    /// No report stored under the derived key (404)
    #[error("Report not found for date {date} and farm {farm_id}")]
    NotFound { date: String, farm_id: String },

    /// Blob backend failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ReportError {
    /// Wire error code
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Validation(_) => "ValidationError",
            ReportError::NotFound { .. } => "NotFound",
            ReportError::Internal(_) => "InternalServerError",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        match self {
            ReportError::Validation(_) => 400,
            ReportError::NotFound { .. } => 404,
            ReportError::Internal(_) => 500,
        }
    }
}

impl From<StoreError> for ReportError {
    fn from(err: StoreError) -> Self {
        ReportError::Internal(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ReportError::NotFound {
            date: "2026-01-17".into(),
            farm_id: "F1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Report not found for date 2026-01-17 and farm F1"
        );
        assert_eq!(err.status(), 404);
        assert_eq!(err.code(), "NotFound");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err: ReportError = StoreError::IoError("disk".into()).into();
        assert_eq!(err.status(), 500);
    }
}
