//! Report retrieval
//!
//! Validation order: farm, date, format. Then one blob read.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::observability::{Event, MetricsRegistry};
use crate::planner::DATE_FORMAT;
use crate::store::{BlobStore, StoreError};

use super::errors::{ReportError, ReportResult};
use super::format::{report_key, ReportFormat};

/// A stored report, returned as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub key: String,
    pub format: ReportFormat,
    pub body: Vec<u8>,
}

impl Report {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Fetches daily reports from a blob store
pub struct ReportService {
    blobs: Arc<dyn BlobStore>,
    metrics: Arc<MetricsRegistry>,
}

impl ReportService {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Shares an existing metrics registry
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Fetches the report for `date` and `farm_id` in `format`
    /// (markdown when absent).
    pub fn fetch(
        &self,
        date: &str,
        farm_id: Option<&str>,
        format: Option<&str>,
    ) -> ReportResult<Report> {
        let farm_id = match farm_id {
            Some(farm) if !farm.is_empty() => farm,
            _ => {
                return Err(ReportError::Validation(
                    "Missing required parameter: farm_id".into(),
                ))
            }
        };

        let parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
            ReportError::Validation("Invalid date format. Expected YYYY-MM-DD".into())
        })?;

        let format = match format {
            None => ReportFormat::DEFAULT,
            Some(value) => ReportFormat::parse(value).ok_or_else(|| {
                ReportError::Validation(
                    "Invalid format. Supported formats: markdown, json, pdf".into(),
                )
            })?,
        };

        let key = report_key(parsed_date, farm_id, format);
        // Keys that cannot name a stored object are simply absent
        let stored = match self.blobs.get(&key) {
            Err(StoreError::InvalidPath(_)) => None,
            other => other?,
        };

        match stored {
            Some(body) => {
                self.metrics.increment_reports_served();
                info!(event = %Event::ReportFetched, %key, bytes = body.len(), "report fetched");
                Ok(Report { key, format, body })
            }
            None => {
                self.metrics.increment_reports_missing();
                warn!(event = %Event::ReportMissing, %key, "report missing");
                Err(ReportError::NotFound {
                    date: date.to_string(),
                    farm_id: farm_id.to_string(),
                })
            }
        }
    }
}
