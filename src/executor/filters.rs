//! Predicate filtering for store records
//!
//! Exact match only, no type coercion. Ranges compare numbers numerically and
//! strings lexicographically; a number never satisfies a string bound.

use std::cmp::Ordering;

use crate::planner::{FilterOp, Predicate};
use crate::store::{AttributeValue, Record};

/// Evaluates predicates against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates (AND semantics)
    pub fn matches<'a>(
        record: &Record,
        predicates: impl IntoIterator<Item = &'a Predicate>,
    ) -> bool {
        predicates
            .into_iter()
            .all(|pred| Self::matches_predicate(record, pred))
    }

    /// Checks if a record matches a single predicate
    pub fn matches_predicate(record: &Record, predicate: &Predicate) -> bool {
        let actual = match record.get(&predicate.field) {
            Some(v) => v,
            None => return false, // Missing attribute = no match
        };

        match &predicate.op {
            FilterOp::Eq(expected) => actual == expected,
            FilterOp::Between(low, high) => {
                matches!(
                    Self::compare(actual, low),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    Self::compare(actual, high),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            FilterOp::Gte(bound) => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lte(bound) => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }

    /// Orders two values of the same comparable type
    fn compare(actual: &AttributeValue, bound: &AttributeValue) -> Option<Ordering> {
        match (actual, bound) {
            (AttributeValue::N(a), AttributeValue::N(b)) => Some(a.cmp(b)),
            (AttributeValue::S(a), AttributeValue::S(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
