//! Shared handler state

use std::sync::Arc;

use crate::collection::CollectionRegistry;
use crate::executor::QueryEngine;
use crate::observability::MetricsRegistry;
use crate::reports::ReportService;
use crate::store::{BlobStore, StoreAdapter};

/// State shared by every handler, read-only after start-up
pub struct AppState {
    pub engine: QueryEngine,
    pub reports: ReportService,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    /// Wires the engine and report service to one metrics registry
    pub fn new(
        registry: Arc<CollectionRegistry>,
        store: Arc<dyn StoreAdapter>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        Self {
            engine: QueryEngine::new(registry, store).with_metrics(Arc::clone(&metrics)),
            reports: ReportService::new(blobs).with_metrics(Arc::clone(&metrics)),
            metrics,
        }
    }
}
