//! Result types for query execution

use serde::Serialize;
use serde_json::Value;

/// Shaped records, ready for the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    /// Records in result order, already converted to JSON
    pub items: Vec<Value>,
    /// Number of items
    pub count: usize,
    /// Rows the store returned before post-filtering
    #[serde(skip)]
    pub scanned_count: usize,
}

impl ResultSet {
    pub fn new(items: Vec<Value>, scanned_count: usize) -> Self {
        Self {
            count: items.len(),
            items,
            scanned_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wire body `{ "items": [...], "count": N }`
    pub fn to_body(&self) -> Value {
        serde_json::json!({
            "items": self.items,
            "count": self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_tracks_items() {
        let set = ResultSet::new(vec![json!({"a": 1}), json!({"a": 2})], 5);
        assert_eq!(set.count, 2);
        assert_eq!(set.scanned_count, 5);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_body_shape() {
        let body = ResultSet::empty().to_body();
        assert_eq!(body, json!({"items": [], "count": 0}));
    }
}
