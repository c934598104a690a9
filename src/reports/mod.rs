//! Daily report pass-through
//!
//! Reports are produced elsewhere and stored as blobs under a key derived
//! from date, farm and format. This module only derives the key and returns
//! the stored bytes with their content type.

mod errors;
mod format;
mod service;

pub use errors::{ReportError, ReportResult};
pub use format::{report_key, ReportFormat};
pub use service::{Report, ReportService};
