//! Query executor
//!
//! Consumes plans and produces wire-ready results.
//!
//! # Execution Flow (strict order)
//!
//! 1. One store call, exactly as planned
//! 2. Post-filter the returned rows
//! 3. Resort on the canonical field (if the plan says so)
//! 4. Truncate to the effective limit
//! 5. Convert decimals to wire numbers

mod engine;
mod filters;
mod numeric;
mod result;
mod shaper;
mod sorter;

pub use engine::QueryEngine;
pub use filters::PredicateFilter;
pub use numeric::{decimal_to_wire, record_to_wire, to_wire};
pub use result::ResultSet;
pub use shaper::ResultShaper;
pub use sorter::ResultSorter;
