//! Storage-native attribute values
//!
//! Records are kept exactly as the key-value store holds them: numbers are
//! arbitrary-precision decimals, never floats. Conversion to the wire format
//! happens once, in the executor's numeric module.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};

/// A single record: attribute name to value, deterministic key order
pub type Record = BTreeMap<String, AttributeValue>;

/// Attribute value as stored
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// String
    S(String),
    /// Number (arbitrary-precision decimal)
    N(Decimal),
    /// Boolean
    Bool(bool),
    /// Explicit null
    Null,
    /// List of values
    L(Vec<AttributeValue>),
    /// Nested map
    M(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Creates a string value
    pub fn string(s: impl Into<String>) -> Self {
        AttributeValue::S(s.into())
    }

    /// Creates a numeric value from an integer
    pub fn integer(n: i64) -> Self {
        AttributeValue::N(Decimal::from(n))
    }

    /// Returns the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the decimal payload, if any
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            AttributeValue::N(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Short type tag, used in explain output
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null => "NULL",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
        }
    }

    /// Renders the value for logs and explain output.
    ///
    /// Numbers keep their decimal text, so nothing is lost here.
    pub fn render(&self) -> String {
        match self {
            AttributeValue::S(s) => format!("\"{}\"", s),
            AttributeValue::N(d) => d.normalize().to_string(),
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Null => "null".to_string(),
            AttributeValue::L(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.render()).collect();
                format!("[{}]", inner.join(", "))
            }
            AttributeValue::M(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.render()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }

    /// Parses a JSON value into its storage form.
    ///
    /// JSON numbers go through their textual form so that `0.1` stays exactly
    /// `0.1` as a decimal.
    pub fn from_json(value: &Value) -> StoreResult<Self> {
        Ok(match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => {
                let text = n.to_string();
                let decimal = Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_err(|e| {
                        StoreError::Malformed(format!("number '{}' out of range: {}", text, e))
                    })?;
                AttributeValue::N(decimal)
            }
            Value::String(s) => AttributeValue::S(s.clone()),
            Value::Array(items) => AttributeValue::L(
                items
                    .iter()
                    .map(AttributeValue::from_json)
                    .collect::<StoreResult<Vec<_>>>()?,
            ),
            Value::Object(map) => AttributeValue::M(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), AttributeValue::from_json(v)?)))
                    .collect::<StoreResult<BTreeMap<_, _>>>()?,
            ),
        })
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::S(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::S(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::integer(n)
    }
}

impl From<Decimal> for AttributeValue {
    fn from(d: Decimal) -> Self {
        AttributeValue::N(d)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

/// Parses a JSON object into a record.
pub fn record_from_json(value: &Value) -> StoreResult<Record> {
    match AttributeValue::from_json(value)? {
        AttributeValue::M(map) => Ok(map),
        other => Err(StoreError::Malformed(format!(
            "record must be an object, got {}",
            other.type_name()
        ))),
    }
}

/// Total order over optional attribute values.
///
/// Ordering rules:
/// - missing < null < bool < number < string < list < map
/// - same types use natural ordering; lists and maps compare equal
pub fn compare_values(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let type_order = |v: &AttributeValue| -> u8 {
                match v {
                    AttributeValue::Null => 0,
                    AttributeValue::Bool(_) => 1,
                    AttributeValue::N(_) => 2,
                    AttributeValue::S(_) => 3,
                    AttributeValue::L(_) => 4,
                    AttributeValue::M(_) => 5,
                }
            };

            let a_type = type_order(a_val);
            let b_type = type_order(b_val);
            if a_type != b_type {
                return a_type.cmp(&b_type);
            }

            match (a_val, b_val) {
                (AttributeValue::Bool(x), AttributeValue::Bool(y)) => x.cmp(y),
                (AttributeValue::N(x), AttributeValue::N(y)) => x.cmp(y),
                (AttributeValue::S(x), AttributeValue::S(y)) => x.cmp(y),
                _ => Ordering::Equal,
            }
        }
    }
}
