//! Report formats and object keys

use chrono::{Datelike, NaiveDate};

/// Stored report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
    Pdf,
}

impl ReportFormat {
    /// Format used when the request names none
    pub const DEFAULT: ReportFormat = ReportFormat::Markdown;

    /// Parses the `format` query parameter
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "markdown" => Some(ReportFormat::Markdown),
            "json" => Some(ReportFormat::Json),
            "pdf" => Some(ReportFormat::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
            ReportFormat::Pdf => "pdf",
        }
    }

    /// Object file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "text/markdown",
            ReportFormat::Json => "application/json",
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

/// Object key of a daily report:
/// `daily/{farm_id}/{YYYY}/{MM}/{YYYY-MM-DD}_daily_report.{ext}`
pub fn report_key(date: NaiveDate, farm_id: &str, format: ReportFormat) -> String {
    format!(
        "daily/{}/{:04}/{:02}/{}_daily_report.{}",
        farm_id,
        date.year(),
        date.month(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
