//! Explain plan output
//!
//! Produces deterministic, human-readable (and JSON) explain output without
//! touching the store.

use std::fmt;

use serde::Serialize;

use super::ast::StoreOperation;
use super::errors::QueryError;
use super::selector::QueryPlan;

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainPlan {
    /// Whether the request was accepted
    pub accepted: bool,
    pub collection: Option<String>,
    /// Access path tag (`PK_QUERY`, `INDEX_QUERY`, ...)
    pub access_path: Option<String>,
    /// `QUERY` or `SCAN`
    pub operation: Option<String>,
    pub table: Option<String>,
    pub index: Option<String>,
    /// Conditions evaluated by the store
    pub store_conditions: Vec<String>,
    /// Conditions evaluated after the store call
    pub post_filters: Vec<String>,
    /// Resort description, e.g. `flight_start desc`
    pub resort: Option<String>,
    pub limit: Option<usize>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a selected query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let store_conditions = match &plan.operation {
            StoreOperation::Query { key_conditions, .. } => {
                key_conditions.predicates().map(|p| p.describe()).collect()
            }
            StoreOperation::Scan {
                filter_conditions, ..
            } => filter_conditions.iter().map(|p| p.describe()).collect(),
        };

        Self {
            accepted: true,
            collection: Some(plan.collection.clone()),
            access_path: Some(plan.access_path.as_str().to_string()),
            operation: Some(plan.operation.kind().to_string()),
            table: Some(plan.operation.table().to_string()),
            index: plan.index_name().map(str::to_string),
            store_conditions,
            post_filters: plan.post_filters.iter().map(|p| p.describe()).collect(),
            resort: plan
                .resort
                .as_ref()
                .map(|s| format!("{} {}", s.field, s.direction.as_str())),
            limit: Some(plan.limit),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a rejected request
    pub fn from_error(err: &QueryError) -> Self {
        Self {
            accepted: false,
            collection: None,
            access_path: None,
            operation: None,
            table: None,
            index: None,
            store_conditions: Vec::new(),
            post_filters: Vec::new(),
            resort: None,
            limit: None,
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.kind().code().to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if !self.accepted {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
            return Ok(());
        }

        writeln!(f, "Status: ACCEPTED")?;
        if let Some(collection) = &self.collection {
            writeln!(f, "Collection: {}", collection)?;
        }
        if let Some(path) = &self.access_path {
            writeln!(f, "Access Path: {}", path)?;
        }
        if let (Some(op), Some(table)) = (&self.operation, &self.table) {
            match &self.index {
                Some(index) => writeln!(f, "Operation: {} {} ({})", op, table, index)?,
                None => writeln!(f, "Operation: {} {}", op, table)?,
            }
        }
        if !self.store_conditions.is_empty() {
            writeln!(f, "Store Conditions:")?;
            for cond in &self.store_conditions {
                writeln!(f, "  - {}", cond)?;
            }
        }
        if !self.post_filters.is_empty() {
            writeln!(f, "Post Filters:")?;
            for cond in &self.post_filters {
                writeln!(f, "  - {}", cond)?;
            }
        }
        if let Some(resort) = &self.resort {
            writeln!(f, "Resort: {}", resort)?;
        }
        if let Some(limit) = self.limit {
            writeln!(f, "Limit: {}", limit)?;
        }

        Ok(())
    }
}
