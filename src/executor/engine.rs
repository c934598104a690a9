//! Query engine
//!
//! Runs the whole read path for one request:
//! normalize, select, one store call, shape.
//!
//! The engine is shared by every handler. It holds no per-request state, so
//! concurrent requests never observe each other.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::collection::{CollectionDescriptor, CollectionRegistry};
use crate::observability::{Event, MetricsRegistry};
use crate::planner::{
    AccessPathSelector, ExplainPlan, ParamNormalizer, QueryError, QueryPlan, QueryResult,
    StoreOperation,
};
use crate::store::StoreAdapter;

use super::result::ResultSet;
use super::shaper::ResultShaper;

/// Query engine bound to one registry and one store
pub struct QueryEngine {
    registry: Arc<CollectionRegistry>,
    store: Arc<dyn StoreAdapter>,
    metrics: Arc<MetricsRegistry>,
}

impl QueryEngine {
    /// Creates an engine with a fresh metrics registry
    pub fn new(registry: Arc<CollectionRegistry>, store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            registry,
            store,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Shares an existing metrics registry
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Looks up a collection; unknown names are caller errors
    pub fn descriptor(&self, collection: &str) -> QueryResult<Arc<CollectionDescriptor>> {
        self.registry
            .require(collection)
            .map_err(|e| QueryError::Validation(e.to_string()))
    }

    /// Normalizes and plans a request without touching the store
    pub fn plan(&self, collection: &str, raw: &HashMap<String, String>) -> QueryResult<QueryPlan> {
        let descriptor = self.descriptor(collection)?;
        let request = ParamNormalizer::normalize(raw, &descriptor)?;
        let plan = AccessPathSelector::select(&request, &descriptor);

        debug!(
            event = %Event::QueryPlanned,
            collection = %plan.collection,
            access_path = plan.access_path.as_str(),
            table = plan.operation.table(),
            index = plan.index_name().unwrap_or("-"),
            limit = plan.limit,
            "query planned"
        );
        Ok(plan)
    }

    /// Explain output for a request; rejected requests explain their error
    pub fn explain(&self, collection: &str, raw: &HashMap<String, String>) -> ExplainPlan {
        match self.plan(collection, raw) {
            Ok(plan) => ExplainPlan::from_plan(&plan),
            Err(err) => ExplainPlan::from_error(&err),
        }
    }

    /// Executes a request end to end, recording its outcome
    pub fn execute(
        &self,
        collection: &str,
        raw: &HashMap<String, String>,
    ) -> QueryResult<ResultSet> {
        let outcome = self
            .plan(collection, raw)
            .and_then(|plan| self.run(&plan));

        match &outcome {
            Ok(set) => {
                self.metrics.increment_queries_executed();
                info!(
                    event = %Event::QueryComplete,
                    collection,
                    count = set.count,
                    scanned = set.scanned_count,
                    "query complete"
                );
            }
            Err(QueryError::Validation(message)) => {
                self.metrics.increment_queries_rejected();
                warn!(event = %Event::QueryRejected, collection, %message, "query rejected");
            }
            Err(QueryError::Internal(message)) => {
                self.metrics.increment_queries_failed();
                error!(event = %Event::QueryFailed, collection, %message, "query failed");
            }
        }

        outcome
    }

    /// Makes the plan's single store call and shapes the rows
    pub fn run(&self, plan: &QueryPlan) -> QueryResult<ResultSet> {
        self.metrics.record_store_call(plan.access_path);

        let raw = match &plan.operation {
            StoreOperation::Query {
                table,
                index_name,
                key_conditions,
                limit,
                scan_forward,
            } => self.store.query(
                table,
                index_name.as_deref(),
                key_conditions,
                *limit,
                *scan_forward,
            )?,
            StoreOperation::Scan {
                table,
                filter_conditions,
                limit,
            } => self.store.scan(table, filter_conditions, *limit)?,
        };

        Ok(ResultShaper::shape(raw, plan))
    }
}
