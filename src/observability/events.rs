//! Observability events
//!
//! Every lifecycle and per-request log line carries one of these names in its
//! `event` field, so logs can be filtered on a fixed vocabulary.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// HTTP server bound and serving
    ServerStart,
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// In-memory store loaded from a seed file
    StoreSeeded,

    // Query operations
    /// Access path chosen
    QueryPlanned,
    /// Query answered with 200
    QueryComplete,
    /// Query rejected by validation
    QueryRejected,
    /// Store or transport failure
    QueryFailed,

    // Reports
    /// Report object returned
    ReportFetched,
    /// Report object absent
    ReportMissing,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ServerStart => "SERVER_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreSeeded => "STORE_SEEDED",

            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",

            Event::ReportFetched => "REPORT_FETCHED",
            Event::ReportMissing => "REPORT_MISSING",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
