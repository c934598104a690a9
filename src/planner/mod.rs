//! Query planner
//!
//! Turns raw route parameters into one deterministic store operation.
//!
//! # Pipeline
//!
//! - Normalizer: raw strings to a typed `QueryRequest`; all validation
//!   happens here, before the store is touched
//! - Selector: `QueryRequest` to a `QueryPlan` holding exactly one
//!   `StoreOperation`, post-filters and an optional resort
//!
//! # Access Path Priority (strict order)
//!
//! 1. Base table partition key
//! 2. Secondary index partition key (indexes tried by name)
//! 3. Filtered scan
//! 4. Full scan

mod ast;
mod errors;
mod explain;
mod normalizer;
mod selector;

pub use ast::{
    FilterOp, KeyConditions, Predicate, QueryRequest, RangeBounds, SortDirection, SortSpec,
    StoreOperation,
};
pub use errors::{QueryError, QueryErrorKind, QueryResult};
pub use explain::ExplainPlan;
pub use normalizer::{clamp_limit, ParamNormalizer, DATE_FORMAT, LIMIT_PARAM, MAX_LIMIT, MIN_LIMIT};
pub use selector::{AccessPath, AccessPathSelector, QueryPlan};
