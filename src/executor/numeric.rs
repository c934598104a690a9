//! Wire conversion
//!
//! The store keeps numbers as arbitrary-precision decimals. The wire format is
//! plain JSON, so every decimal is converted to an `f64` number here, and only
//! here. Precision beyond what `f64` holds is lost; values that do not map to
//! a finite float become `null`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::store::{AttributeValue, Record};

/// Converts a stored decimal to a JSON number
pub fn decimal_to_wire(value: &Decimal) -> Value {
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Converts any attribute value to JSON, recursing into lists and maps
pub fn to_wire(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(d) => decimal_to_wire(d),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(to_wire).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_wire(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Converts a whole record to a JSON object
pub fn record_to_wire(record: &Record) -> Value {
    Value::Object(
        record
            .iter()
            .map(|(k, v)| (k.clone(), to_wire(v)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record_from_json;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_integer_decimal() {
        assert_eq!(decimal_to_wire(&Decimal::from(1700000000i64)), json!(1700000000.0));
    }

    #[test]
    fn test_fractional_decimal() {
        let d = Decimal::from_str("0.82").unwrap();
        assert_eq!(decimal_to_wire(&d), json!(0.82));
    }

    #[test]
    fn test_negative_decimal() {
        let d = Decimal::from_str("-12.5").unwrap();
        assert_eq!(decimal_to_wire(&d), json!(-12.5));
    }

    #[test]
    fn test_nested_record() {
        let record = record_from_json(&json!({
            "image_id": "img-1",
            "confidence": 0.91,
            "healthy": true,
            "notes": null,
            "bbox": [1, 2],
            "NPK_values": {"nitrogen": 40}
        }))
        .unwrap();

        let wire = record_to_wire(&record);
        assert_eq!(wire["image_id"], json!("img-1"));
        assert_eq!(wire["confidence"], json!(0.91));
        assert_eq!(wire["healthy"], json!(true));
        assert_eq!(wire["notes"], Value::Null);
        assert_eq!(wire["bbox"], json!([1.0, 2.0]));
        assert_eq!(wire["NPK_values"]["nitrogen"], json!(40.0));
    }
}
