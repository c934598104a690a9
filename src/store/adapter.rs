//! Store adapter boundary
//!
//! The query engine only ever talks to the key-value store through this
//! trait. Both calls apply `limit` to the rows the store reads, before any
//! filtering done on the caller's side.

use crate::planner::{KeyConditions, Predicate};

use super::errors::StoreResult;
use super::value::Record;

/// Read-side interface of a partitioned key-value store
pub trait StoreAdapter: Send + Sync {
    /// Keyed query against the base table (`index == None`) or a named
    /// secondary index. Results are ordered by the schema's sort key,
    /// descending when `scan_forward` is false.
    fn query(
        &self,
        table: &str,
        index: Option<&str>,
        key_conditions: &KeyConditions,
        limit: usize,
        scan_forward: bool,
    ) -> StoreResult<Vec<Record>>;

    /// Full-table read of at most `limit` rows, with `filter_conditions`
    /// (AND semantics) evaluated over those rows.
    fn scan(
        &self,
        table: &str,
        filter_conditions: &[Predicate],
        limit: usize,
    ) -> StoreResult<Vec<Record>>;
}

impl<S: StoreAdapter + ?Sized> StoreAdapter for std::sync::Arc<S> {
    fn query(
        &self,
        table: &str,
        index: Option<&str>,
        key_conditions: &KeyConditions,
        limit: usize,
        scan_forward: bool,
    ) -> StoreResult<Vec<Record>> {
        (**self).query(table, index, key_conditions, limit, scan_forward)
    }

    fn scan(
        &self,
        table: &str,
        filter_conditions: &[Predicate],
        limit: usize,
    ) -> StoreResult<Vec<Record>> {
        (**self).scan(table, filter_conditions, limit)
    }
}
