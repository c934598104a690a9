//! Parameter normalizer
//!
//! Turns a route's raw string parameters into a typed `QueryRequest`.
//! Every check here runs before the store is touched.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::collection::{CollectionDescriptor, ParamKind, ParamRole, ParamSpec};
use crate::store::AttributeValue;

use super::ast::{Predicate, QueryRequest};
use super::errors::{QueryError, QueryResult};

/// Maximum number of records a single request can return
pub const MAX_LIMIT: usize = 1000;

/// Smallest effective limit
pub const MIN_LIMIT: usize = 1;

/// Name of the limit parameter on every route
pub const LIMIT_PARAM: &str = "limit";

/// Date format accepted by date parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clamps a requested limit into `[MIN_LIMIT, MAX_LIMIT]`.
///
/// Out-of-range values are corrected, never rejected.
pub fn clamp_limit(requested: i64) -> usize {
    requested.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize
}

/// Builds typed requests from raw parameter maps
pub struct ParamNormalizer;

impl ParamNormalizer {
    /// Normalizes raw parameters against a collection descriptor.
    ///
    /// - required parameters must be present and non-empty
    /// - `limit` and integer parameters must parse as `i64`
    /// - date parameters must be `YYYY-MM-DD`
    /// - undeclared parameters become equality filters on the field of the
    ///   same name
    pub fn normalize(
        raw: &HashMap<String, String>,
        descriptor: &CollectionDescriptor,
    ) -> QueryResult<QueryRequest> {
        for param in descriptor.required_params() {
            match raw.get(&param.name) {
                Some(value) if !value.is_empty() => {}
                _ => return Err(QueryError::missing_param(&param.name)),
            }
        }

        let limit = match raw.get(LIMIT_PARAM) {
            Some(value) => parse_limit(value)?,
            None => clamp_limit(descriptor.default_limit as i64),
        };

        let mut request = QueryRequest::new(descriptor.name.clone(), limit);

        for param in &descriptor.params {
            if let Some(value) = raw.get(&param.name) {
                apply_param(&mut request, param, value)?;
            }
        }

        let mut undeclared: Vec<(&String, &String)> = raw
            .iter()
            .filter(|(name, _)| name.as_str() != LIMIT_PARAM && descriptor.param(name).is_none())
            .collect();
        undeclared.sort();

        for (name, value) in undeclared {
            request
                .equalities
                .push(Predicate::eq(name.clone(), value.clone()));
        }

        Ok(request)
    }
}

fn apply_param(request: &mut QueryRequest, param: &ParamSpec, value: &str) -> QueryResult<()> {
    match param.role {
        ParamRole::Equality => {
            let typed = parse_value(param, value)?;
            request.equalities.push(Predicate::eq(param.field.clone(), typed));
        }
        ParamRole::RangeLower => {
            let bound = parse_integer(&param.name, value)?;
            request.bounds_mut(&param.field).lower = Some(bound);
        }
        ParamRole::RangeUpper => {
            let bound = parse_integer(&param.name, value)?;
            request.bounds_mut(&param.field).upper = Some(bound);
        }
    }
    Ok(())
}

fn parse_value(param: &ParamSpec, value: &str) -> QueryResult<AttributeValue> {
    match param.kind {
        ParamKind::Text => Ok(AttributeValue::string(value)),
        ParamKind::Integer => parse_integer(&param.name, value).map(AttributeValue::integer),
        ParamKind::Date => {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                QueryError::invalid_param(&param.name, "a date (YYYY-MM-DD)")
            })?;
            Ok(AttributeValue::string(value))
        }
    }
}

/// Parses and clamps `limit`. Integers beyond `i64` are clamped by sign.
fn parse_limit(value: &str) -> QueryResult<usize> {
    match parse_integer(LIMIT_PARAM, value) {
        Ok(n) => Ok(clamp_limit(n)),
        Err(err) => {
            let trimmed = value.trim();
            let (negative, digits) = match trimmed.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err);
            }
            Ok(if negative { MIN_LIMIT } else { MAX_LIMIT })
        }
    }
}

fn parse_integer(name: &str, value: &str) -> QueryResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| QueryError::invalid_param(name, "an integer"))
}
