//! Metrics registry
//!
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::planner::AccessPath;

/// Metrics registry containing all query-path counters
///
/// # Thread Safety
///
/// Counters use Relaxed atomics; a snapshot may straddle concurrent requests.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Queries answered with 200
    queries_executed: AtomicU64,
    /// Queries rejected by validation
    queries_rejected: AtomicU64,
    /// Queries failed in the store or transport
    queries_failed: AtomicU64,
    /// Calls made to the store adapter
    store_calls: AtomicU64,
    pk_queries: AtomicU64,
    index_queries: AtomicU64,
    filtered_scans: AtomicU64,
    full_scans: AtomicU64,
    /// Report objects served
    reports_served: AtomicU64,
    /// Report lookups that found nothing
    reports_missing: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Query outcomes

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    // Store traffic

    /// Records one store call made through `path`
    pub fn record_store_call(&self, path: AccessPath) {
        self.store_calls.fetch_add(1, Ordering::Relaxed);
        let counter = match path {
            AccessPath::PrimaryKey => &self.pk_queries,
            AccessPath::SecondaryIndex => &self.index_queries,
            AccessPath::FilteredScan => &self.filtered_scans,
            AccessPath::FullScan => &self.full_scans,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn store_calls(&self) -> u64 {
        self.store_calls.load(Ordering::Relaxed)
    }

    // Reports

    pub fn increment_reports_served(&self) {
        self.reports_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reports_missing(&self) {
        self.reports_missing.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            store_calls: self.store_calls.load(Ordering::Relaxed),
            pk_queries: self.pk_queries.load(Ordering::Relaxed),
            index_queries: self.index_queries.load(Ordering::Relaxed),
            filtered_scans: self.filtered_scans.load(Ordering::Relaxed),
            full_scans: self.full_scans.load(Ordering::Relaxed),
            reports_served: self.reports_served.load(Ordering::Relaxed),
            reports_missing: self.reports_missing.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub queries_failed: u64,
    pub store_calls: u64,
    pub pk_queries: u64,
    pub index_queries: u64,
    pub filtered_scans: u64,
    pub full_scans: u64,
    pub reports_served: u64,
    pub reports_missing: u64,
}
