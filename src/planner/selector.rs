//! Access path selector
//!
//! Chooses exactly one store operation for a normalized request.
//! First matching rule wins:
//!
//! 1. Base partition key supplied: query the base table
//! 2. An index partition key supplied: query that index (indexes tried in
//!    lexicographic name order)
//! 3. Filters but no key route: scan with every filter pushed down
//! 4. No filters: unconditional scan bounded by `limit`
//!
//! For keyed queries only the key conditions reach the store. Everything
//! else becomes a post-filter for the shaper.

use crate::collection::CollectionDescriptor;
use crate::store::KeySchema;

use super::ast::{KeyConditions, Predicate, QueryRequest, SortSpec, StoreOperation};

/// How the store is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPath {
    /// Keyed query on the base table
    PrimaryKey,
    /// Keyed query on a secondary index
    SecondaryIndex,
    /// Scan with pushed-down filter conditions
    FilteredScan,
    /// Scan bounded only by limit
    FullScan,
}

impl AccessPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPath::PrimaryKey => "PK_QUERY",
            AccessPath::SecondaryIndex => "INDEX_QUERY",
            AccessPath::FilteredScan => "FILTERED_SCAN",
            AccessPath::FullScan => "FULL_SCAN",
        }
    }
}

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Collection the request targeted
    pub collection: String,
    pub access_path: AccessPath,
    /// The single store call this request makes
    pub operation: StoreOperation,
    /// Predicates the shaper applies to returned records
    pub post_filters: Vec<Predicate>,
    /// Set when the operation's native order is not the canonical order
    pub resort: Option<SortSpec>,
    /// Effective limit, also carried by `operation`
    pub limit: usize,
}

impl QueryPlan {
    /// Index the operation targets, if any
    pub fn index_name(&self) -> Option<&str> {
        match &self.operation {
            StoreOperation::Query { index_name, .. } => index_name.as_deref(),
            StoreOperation::Scan { .. } => None,
        }
    }
}

/// Deterministic access path selection
pub struct AccessPathSelector;

impl AccessPathSelector {
    /// Plans a request. Same request and descriptor always give the same plan.
    pub fn select(request: &QueryRequest, descriptor: &CollectionDescriptor) -> QueryPlan {
        let limit = request.limit;
        let scan_forward = descriptor.sort_direction.scan_forward();

        // Rule 1
        if let Some((key_conditions, post_filters)) =
            key_route(request, &descriptor.key_schema)
        {
            return QueryPlan {
                collection: descriptor.name.clone(),
                access_path: AccessPath::PrimaryKey,
                operation: StoreOperation::Query {
                    table: descriptor.table.clone(),
                    index_name: None,
                    key_conditions,
                    limit,
                    scan_forward,
                },
                post_filters,
                resort: resort_for(Some(&descriptor.key_schema), descriptor),
                limit,
            };
        }

        // Rule 2
        let mut indexes: Vec<_> = descriptor.indexes.iter().collect();
        indexes.sort_by(|a, b| a.name.cmp(&b.name));

        for index in indexes {
            if let Some((key_conditions, post_filters)) = key_route(request, &index.key_schema) {
                return QueryPlan {
                    collection: descriptor.name.clone(),
                    access_path: AccessPath::SecondaryIndex,
                    operation: StoreOperation::Query {
                        table: descriptor.table.clone(),
                        index_name: Some(index.name.clone()),
                        key_conditions,
                        limit,
                        scan_forward,
                    },
                    post_filters,
                    resort: resort_for(Some(&index.key_schema), descriptor),
                    limit,
                };
            }
        }

        // Rules 3 and 4
        let filter_conditions = request.predicates();
        let access_path = if filter_conditions.is_empty() {
            AccessPath::FullScan
        } else {
            AccessPath::FilteredScan
        };

        QueryPlan {
            collection: descriptor.name.clone(),
            access_path,
            operation: StoreOperation::Scan {
                table: descriptor.table.clone(),
                filter_conditions,
                limit,
            },
            post_filters: Vec::new(),
            resort: resort_for(None, descriptor),
            limit,
        }
    }
}

/// Splits a request into key conditions for `schema` and leftover
/// post-filters. `None` when the partition key is not supplied.
fn key_route(
    request: &QueryRequest,
    schema: &KeySchema,
) -> Option<(KeyConditions, Vec<Predicate>)> {
    let partition_pos = request
        .equalities
        .iter()
        .position(|p| p.field == schema.partition_key)?;

    let mut key_conditions = KeyConditions::partition(request.equalities[partition_pos].clone());
    let mut post_filters: Vec<Predicate> = request
        .equalities
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != partition_pos)
        .map(|(_, p)| p.clone())
        .collect();

    for (field, bounds) in &request.ranges {
        let Some(predicate) = bounds.to_predicate(field) else {
            continue;
        };
        if schema.sort_key.as_deref() == Some(field.as_str()) {
            key_conditions = key_conditions.with_sort(predicate);
        } else {
            post_filters.push(predicate);
        }
    }

    Some((key_conditions, post_filters))
}

/// Scans have no order; keyed queries are ordered by their sort key.
fn resort_for(schema: Option<&KeySchema>, descriptor: &CollectionDescriptor) -> Option<SortSpec> {
    let ordered = schema
        .and_then(|s| s.sort_key.as_deref())
        .map_or(false, |sort_key| sort_key == descriptor.sort_field);

    if ordered {
        None
    } else {
        Some(SortSpec {
            field: descriptor.sort_field.clone(),
            direction: descriptor.sort_direction,
        })
    }
}
