//! Result sorting
//!
//! Stable and deterministic. Missing and null values order as the minimum,
//! so they trail a descending sort.

use crate::planner::{SortDirection, SortSpec};
use crate::store::{compare_values, Record};

/// Sorts store records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to sort specification.
    ///
    /// Records that compare equal keep their store order.
    pub fn sort(records: &mut [Record], sort_spec: &SortSpec) {
        records.sort_by(|a, b| {
            let ordering = compare_values(a.get(&sort_spec.field), b.get(&sort_spec.field));

            match sort_spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{record_from_json, AttributeValue};
    use serde_json::json;

    fn make_flight(id: &str, start: serde_json::Value) -> Record {
        record_from_json(&json!({"flight_id": id, "flight_start": start})).unwrap()
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r["flight_id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_sort_descending() {
        let mut flights = vec![
            make_flight("b", json!(200)),
            make_flight("a", json!(100)),
            make_flight("c", json!(300)),
        ];

        ResultSorter::sort(&mut flights, &SortSpec::desc("flight_start"));
        assert_eq!(ids(&flights), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_ascending() {
        let mut flights = vec![
            make_flight("b", json!(200)),
            make_flight("a", json!(100)),
            make_flight("c", json!(300)),
        ];

        ResultSorter::sort(&mut flights, &SortSpec::asc("flight_start"));
        assert_eq!(ids(&flights), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_stable() {
        let mut flights = vec![
            make_flight("a", json!(100)),
            make_flight("b", json!(100)),
            make_flight("c", json!(100)),
        ];

        ResultSorter::sort(&mut flights, &SortSpec::desc("flight_start"));
        assert_eq!(ids(&flights), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_and_null_trail_descending() {
        let mut flights = vec![
            record_from_json(&json!({"flight_id": "missing"})).unwrap(),
            make_flight("null", json!(null)),
            make_flight("early", json!(10)),
            make_flight("late", json!(20)),
        ];

        ResultSorter::sort(&mut flights, &SortSpec::desc("flight_start"));
        assert_eq!(ids(&flights), vec!["late", "early", "null", "missing"]);
    }

    #[test]
    fn test_iso_timestamps_sort_as_strings() {
        let mut flights = vec![
            make_flight("a", json!("2026-01-17T08:00:00")),
            make_flight("b", json!("2026-01-17T10:30:00")),
        ];

        ResultSorter::sort(&mut flights, &SortSpec::desc("flight_start"));
        assert_eq!(ids(&flights), vec!["b", "a"]);
        assert_eq!(
            flights[0]["flight_start"],
            AttributeValue::string("2026-01-17T10:30:00")
        );
    }
}
