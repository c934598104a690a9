//! Collection descriptors
//!
//! A descriptor is the static, per-collection configuration that drives the
//! generic query path: which parameters a route accepts, how they map onto
//! record fields, the table's key schema and secondary indexes, and the
//! ordering results are returned in.

use crate::planner::SortDirection;
use crate::store::{KeySchema, TableDefinition};

/// How a raw parameter string is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any string, kept verbatim
    Text,
    /// Signed 64-bit integer
    Integer,
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Integer => "integer",
            ParamKind::Date => "date",
        }
    }
}

/// What a parameter contributes to the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// `field == value`
    Equality,
    /// `field >= value`
    RangeLower,
    /// `field <= value`
    RangeUpper,
}

/// Declared query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name on the wire
    pub name: String,
    /// Record field the parameter filters on
    pub field: String,
    pub kind: ParamKind,
    pub role: ParamRole,
    /// Absence is a validation error
    pub required: bool,
}

impl ParamSpec {
    fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        kind: ParamKind,
        role: ParamRole,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            kind,
            role,
            required,
        }
    }

    /// Required text equality parameter filtering the field of the same name
    pub fn required_text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, ParamKind::Text, ParamRole::Equality, true)
    }

    /// Optional text equality parameter filtering the field of the same name
    pub fn optional_text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, ParamKind::Text, ParamRole::Equality, false)
    }

    /// Optional date equality parameter filtering the field of the same name
    pub fn optional_date(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, ParamKind::Date, ParamRole::Equality, false)
    }

    /// Optional integer lower bound on `field`
    pub fn lower_bound(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(name, field, ParamKind::Integer, ParamRole::RangeLower, false)
    }

    /// Optional integer upper bound on `field`
    pub fn upper_bound(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(name, field, ParamKind::Integer, ParamRole::RangeUpper, false)
    }
}

/// Secondary index over a collection's table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub name: String,
    pub key_schema: KeySchema,
}

/// Static metadata for one queryable collection
#[derive(Debug, Clone)]
pub struct CollectionDescriptor {
    /// Collection name, also the route segment (`/cv-results`)
    pub name: String,
    /// Backing table name
    pub table: String,
    /// Base table key schema
    pub key_schema: KeySchema,
    /// Secondary indexes, in declaration order
    pub indexes: Vec<IndexDescriptor>,
    /// Field results are ordered by when no key provides the order
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// Limit used when the request does not carry one
    pub default_limit: usize,
    /// Declared parameters, in declaration order
    pub params: Vec<ParamSpec>,
}

impl CollectionDescriptor {
    /// Creates a descriptor with no indexes or parameters, ordered by
    /// `sort_field` descending.
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        key_schema: KeySchema,
        sort_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            key_schema,
            indexes: Vec::new(),
            sort_field: sort_field.into(),
            sort_direction: SortDirection::Desc,
            default_limit: 100,
            params: Vec::new(),
        }
    }

    pub fn with_index(mut self, name: impl Into<String>, key_schema: KeySchema) -> Self {
        self.indexes.push(IndexDescriptor {
            name: name.into(),
            key_schema,
        });
        self
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Looks up a declared parameter by wire name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Required parameters, in declaration order
    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }

    /// Store-side table layout for this collection
    pub fn table_definition(&self) -> TableDefinition {
        self.indexes.iter().fold(
            TableDefinition::new(self.table.clone(), self.key_schema.clone()),
            |def, index| def.with_index(index.name.clone(), index.key_schema.clone()),
        )
    }
}
