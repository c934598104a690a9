//! Result shaper
//!
//! Strict order:
//! 1. Drop records failing any post-filter
//! 2. Resort on the canonical field (only when the plan asks for it)
//! 3. Truncate to the effective limit
//! 4. Convert to wire JSON
//!
//! The store already applied `limit` to the rows it read, so a filtered
//! request can come back with fewer than `limit` items even when more
//! matching records exist. No continuation is attempted.

use crate::planner::QueryPlan;
use crate::store::Record;

use super::filters::PredicateFilter;
use super::numeric::record_to_wire;
use super::result::ResultSet;
use super::sorter::ResultSorter;

/// Turns raw store rows into the response payload
pub struct ResultShaper;

impl ResultShaper {
    pub fn shape(raw: Vec<Record>, plan: &QueryPlan) -> ResultSet {
        let scanned_count = raw.len();

        let mut records: Vec<Record> = if plan.post_filters.is_empty() {
            raw
        } else {
            raw.into_iter()
                .filter(|record| PredicateFilter::matches(record, &plan.post_filters))
                .collect()
        };

        if let Some(spec) = &plan.resort {
            ResultSorter::sort(&mut records, spec);
        }

        records.truncate(plan.limit);

        let items = records.iter().map(record_to_wire).collect();
        ResultSet::new(items, scanned_count)
    }
}
