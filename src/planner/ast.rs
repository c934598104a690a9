//! Query request and store operation structures
//!
//! `QueryRequest` is the typed form of a route's raw parameters, built once
//! by the normalizer. `StoreOperation` is what the selector hands to the
//! store adapter.

use crate::store::AttributeValue;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(AttributeValue),
    /// Inclusive range: low <= field <= high
    Between(AttributeValue, AttributeValue),
    /// Greater than or equal: field >= value
    Gte(AttributeValue),
    /// Less than or equal: field <= value
    Lte(AttributeValue),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        !self.is_equality()
    }

    /// Returns the operation name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Between(_, _) => "between",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lte(_) => "lte",
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    /// Create an inclusive range predicate
    pub fn between(
        field: impl Into<String>,
        low: impl Into<AttributeValue>,
        high: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Between(low.into(), high.into()),
        }
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value.into()),
        }
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value.into()),
        }
    }

    /// Returns true if this is an equality predicate
    pub fn is_equality(&self) -> bool {
        self.op.is_equality()
    }

    /// Returns true if this is a range predicate
    pub fn is_range(&self) -> bool {
        self.op.is_range()
    }

    /// `field op value` rendering for explain output and logs
    pub fn describe(&self) -> String {
        match &self.op {
            FilterOp::Eq(v) | FilterOp::Gte(v) | FilterOp::Lte(v) => {
                format!("{} {} {}", self.field, self.op.op_name(), v.render())
            }
            FilterOp::Between(low, high) => format!(
                "{} between {} and {}",
                self.field,
                low.render(),
                high.render()
            ),
        }
    }
}

/// Inclusive bounds collected for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeBounds {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl RangeBounds {
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Collapses the bounds into exactly one of `between`, `gte` or `lte`.
    pub fn to_predicate(&self, field: &str) -> Option<Predicate> {
        match (self.lower, self.upper) {
            (Some(low), Some(high)) => Some(Predicate::between(field, low, high)),
            (Some(low), None) => Some(Predicate::gte(field, low)),
            (None, Some(high)) => Some(Predicate::lte(field, high)),
            (None, None) => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Store-side traversal flag for this direction
    pub fn scan_forward(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Typed query request, produced by the normalizer.
///
/// Absent parameters are simply absent: there is no empty-string or zero
/// placeholder, so "not filtering on X" and "X equals the empty string" stay
/// distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Target collection name
    pub collection: String,
    /// Equality predicates: declared parameters in declaration order, then
    /// undeclared ones sorted by name
    pub equalities: Vec<Predicate>,
    /// Range bounds keyed by field, in declaration order
    pub ranges: Vec<(String, RangeBounds)>,
    /// Effective limit, always within `[1, MAX_LIMIT]`
    pub limit: usize,
}

impl QueryRequest {
    /// Creates a request with no filters
    pub fn new(collection: impl Into<String>, limit: usize) -> Self {
        Self {
            collection: collection.into(),
            equalities: Vec::new(),
            ranges: Vec::new(),
            limit,
        }
    }

    /// Adds an equality filter
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.equalities.push(Predicate::eq(field, value));
        self
    }

    /// Sets the lower bound for `field`
    pub fn with_lower(mut self, field: &str, value: i64) -> Self {
        self.bounds_mut(field).lower = Some(value);
        self
    }

    /// Sets the upper bound for `field`
    pub fn with_upper(mut self, field: &str, value: i64) -> Self {
        self.bounds_mut(field).upper = Some(value);
        self
    }

    pub(crate) fn bounds_mut(&mut self, field: &str) -> &mut RangeBounds {
        let pos = match self.ranges.iter().position(|(f, _)| f == field) {
            Some(pos) => pos,
            None => {
                self.ranges.push((field.to_string(), RangeBounds::default()));
                self.ranges.len() - 1
            }
        };
        &mut self.ranges[pos].1
    }

    /// Equality value supplied for `field`, if any
    pub fn equality_on(&self, field: &str) -> Option<&AttributeValue> {
        self.equalities.iter().find_map(|p| match &p.op {
            FilterOp::Eq(v) if p.field == field => Some(v),
            _ => None,
        })
    }

    /// Range bounds supplied for `field`, if any
    pub fn range_on(&self, field: &str) -> Option<&RangeBounds> {
        self.ranges
            .iter()
            .find(|(f, b)| f == field && !b.is_empty())
            .map(|(_, b)| b)
    }

    /// Every filter as a predicate: equalities first, then one range
    /// predicate per bounded field
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut all = self.equalities.clone();
        all.extend(
            self.ranges
                .iter()
                .filter_map(|(field, bounds)| bounds.to_predicate(field)),
        );
        all
    }

    /// Returns true if the request filters on nothing
    pub fn is_unfiltered(&self) -> bool {
        self.equalities.is_empty() && self.ranges.iter().all(|(_, b)| b.is_empty())
    }
}

/// Key conditions of a keyed query: partition equality plus at most one
/// sort-key range
#[derive(Debug, Clone, PartialEq)]
pub struct KeyConditions {
    pub partition: Predicate,
    pub sort: Option<Predicate>,
}

impl KeyConditions {
    pub fn partition(partition: Predicate) -> Self {
        Self {
            partition,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Predicate) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Partition condition followed by the sort-key condition, if any
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        std::iter::once(&self.partition).chain(self.sort.iter())
    }
}

/// Operation executed by the store adapter
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOperation {
    /// Keyed query against the base table or a secondary index
    Query {
        table: String,
        index_name: Option<String>,
        key_conditions: KeyConditions,
        limit: usize,
        scan_forward: bool,
    },
    /// Full-table read, optionally filtered
    Scan {
        table: String,
        filter_conditions: Vec<Predicate>,
        limit: usize,
    },
}

impl StoreOperation {
    pub fn is_scan(&self) -> bool {
        matches!(self, StoreOperation::Scan { .. })
    }

    /// Row limit handed to the store
    pub fn limit(&self) -> usize {
        match self {
            StoreOperation::Query { limit, .. } | StoreOperation::Scan { limit, .. } => *limit,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            StoreOperation::Query { table, .. } | StoreOperation::Scan { table, .. } => table,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreOperation::Query { .. } => "QUERY",
            StoreOperation::Scan { .. } => "SCAN",
        }
    }
}
