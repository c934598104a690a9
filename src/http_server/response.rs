//! Response builder
//!
//! Every reply leaves through `TransportResponse`: status, headers and an
//! opaque body. JSON replies and report bodies share the same CORS headers.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::executor::ResultSet;
use crate::planner::QueryError;
use crate::reports::{Report, ReportError};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers attached to every response
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
];

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub message: &'a str,
}

/// Transport-level response
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

impl TransportResponse {
    /// JSON response with the given status
    pub fn json(status: StatusCode, value: &Value) -> Self {
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body: value.to_string().into_bytes(),
        }
    }

    /// `{ "error": code, "message": message }`
    pub fn error(status: StatusCode, code: &str, message: &str) -> Self {
        let body = serde_json::to_value(ErrorBody {
            error: code,
            message,
        })
        .unwrap_or(Value::Null);
        Self::json(status, &body)
    }

    /// Builds the reply for a query outcome
    pub fn from_query(outcome: Result<ResultSet, QueryError>) -> Self {
        match outcome {
            Ok(set) => Self::json(StatusCode::OK, &set.to_body()),
            Err(err) => {
                let kind = err.kind();
                if !err.is_validation() {
                    error!(error = %err, "internal error while answering query");
                }
                Self::error(status_from(kind.status()), kind.code(), err.message())
            }
        }
    }

    /// Builds the reply for a report lookup; found reports keep their bytes
    /// and stored content type
    pub fn from_report(outcome: Result<Report, ReportError>) -> Self {
        match outcome {
            Ok(report) => Self {
                status: StatusCode::OK,
                content_type: report.content_type(),
                body: report.body,
            },
            Err(err) => {
                if err.status() >= 500 {
                    error!(error = %err, "internal error while fetching report");
                }
                Self::error(status_from(err.status()), err.code(), &err.to_string())
            }
        }
    }

    /// Empty 204 answer to a CORS preflight
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            content_type: JSON_CONTENT_TYPE,
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body parsed as JSON, if it is JSON
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for TransportResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        for (name, value) in CORS_HEADERS {
            headers.insert(name, HeaderValue::from_static(value));
        }
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body() {
        let set = ResultSet::new(vec![json!({"image_id": "i1"})], 1);
        let response = TransportResponse::from_query(Ok(set));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(
            response.body_json().unwrap(),
            json!({"items": [{"image_id": "i1"}], "count": 1})
        );
    }

    #[test]
    fn test_validation_error_body() {
        let response =
            TransportResponse::from_query(Err(QueryError::missing_param("farm_id")));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body_json().unwrap(),
            json!({
                "error": "ValidationError",
                "message": "Missing required parameter: farm_id"
            })
        );
    }

    #[test]
    fn test_internal_error_body() {
        let response =
            TransportResponse::from_query(Err(QueryError::Internal("store down".into())));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"error": "InternalServerError", "message": "store down"})
        );
    }

    #[test]
    fn test_report_not_found() {
        let response = TransportResponse::from_report(Err(ReportError::NotFound {
            date: "2026-01-17".into(),
            farm_id: "F1".into(),
        }));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.body_json().unwrap()["message"],
            "Report not found for date 2026-01-17 and farm F1"
        );
    }

    #[test]
    fn test_headers_on_every_response() {
        let response = TransportResponse::preflight().into_response();
        let headers = response.headers();

        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
        assert_eq!(headers["content-type"], "application/json");
    }
}
