//! Query Pipeline Tests
//!
//! End-to-end behavior of normalize -> select -> store -> shape:
//! - validation never reaches the store
//! - the limit handed to the store is always clamped
//! - scans apply their limit before filtering (under-return is kept)
//! - repeated requests against an unchanged store give identical results

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agridrone_query::collection::{CollectionRegistry, CV_RESULTS, FLIGHTS, SENSOR_DATA};
use agridrone_query::executor::{QueryEngine, ResultSet, ResultShaper};
use agridrone_query::http_server::TransportResponse;
use agridrone_query::planner::{
    AccessPath, AccessPathSelector, KeyConditions, Predicate, QueryRequest,
};
use agridrone_query::store::{
    record_from_json, MemoryStore, Record, StoreAdapter, StoreResult,
};
use axum::http::StatusCode;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// One recorded store call
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Query {
        table: String,
        index: Option<String>,
        limit: usize,
        scan_forward: bool,
    },
    Scan {
        table: String,
        filters: usize,
        limit: usize,
    },
}

/// Store wrapper that records every call before delegating
struct CountingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
}

impl CountingStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl StoreAdapter for CountingStore {
    fn query(
        &self,
        table: &str,
        index: Option<&str>,
        key_conditions: &KeyConditions,
        limit: usize,
        scan_forward: bool,
    ) -> StoreResult<Vec<Record>> {
        self.calls.lock().unwrap().push(Call::Query {
            table: table.to_string(),
            index: index.map(str::to_string),
            limit,
            scan_forward,
        });
        self.inner
            .query(table, index, key_conditions, limit, scan_forward)
    }

    fn scan(
        &self,
        table: &str,
        filter_conditions: &[Predicate],
        limit: usize,
    ) -> StoreResult<Vec<Record>> {
        self.calls.lock().unwrap().push(Call::Scan {
            table: table.to_string(),
            filters: filter_conditions.len(),
            limit,
        });
        self.inner.scan(table, filter_conditions, limit)
    }
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn setup(seed: Value) -> (QueryEngine, Arc<CountingStore>) {
    let registry = Arc::new(CollectionRegistry::builtin());
    let memory = MemoryStore::new();
    registry.provision(&memory).unwrap();
    memory.seed_from_json(&seed).unwrap();

    let store = Arc::new(CountingStore::new(memory));
    let engine = QueryEngine::new(registry, store.clone());
    (engine, store)
}

fn ids(set: &ResultSet, field: &str) -> Vec<String> {
    set.items
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

/// 3 F1 images inside [1000, 2000], 10 outside it or on another farm
fn cv_seed() -> Value {
    let mut rows = vec![
        json!({"image_id": "in-1", "farm_id": "F1", "timestamp": 1000, "classification": "healthy"}),
        json!({"image_id": "in-2", "farm_id": "F1", "timestamp": 1500, "classification": "stressed"}),
        json!({"image_id": "in-3", "farm_id": "F1", "timestamp": 2000, "classification": "healthy"}),
    ];
    for i in 0..5 {
        rows.push(json!({"image_id": format!("early-{}", i), "farm_id": "F1", "timestamp": 100 + i}));
        rows.push(json!({"image_id": format!("other-{}", i), "farm_id": "F2", "timestamp": 1200 + i}));
    }
    json!({ "agridrone-demo-cv-results": rows })
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Bounded farm query returns every match, most recent first.
#[test]
fn test_farm_range_query_returns_matches_desc() {
    let (engine, store) = setup(cv_seed());

    let set = engine
        .execute(
            CV_RESULTS,
            &params(&[
                ("farm_id", "F1"),
                ("start_date", "1000"),
                ("end_date", "2000"),
                ("limit", "5"),
            ]),
        )
        .unwrap();

    assert_eq!(set.count, 3);
    assert_eq!(ids(&set, "image_id"), vec!["in-3", "in-2", "in-1"]);
    assert_eq!(
        store.calls(),
        vec![Call::Query {
            table: "agridrone-demo-cv-results".into(),
            index: Some("farm_id-timestamp-index".into()),
            limit: 5,
            scan_forward: false,
        }]
    );
}

/// Oversized limit is clamped before the store sees it.
#[test]
fn test_oversized_limit_clamped_before_store() {
    let (engine, store) = setup(cv_seed());

    engine
        .execute(CV_RESULTS, &params(&[("farm_id", "F1"), ("limit", "5000")]))
        .unwrap();

    match &store.calls()[..] {
        [Call::Query { limit, .. }] => assert_eq!(*limit, 1000),
        other => panic!("unexpected calls {:?}", other),
    }
}

/// Non-positive limit becomes 1.
#[test]
fn test_non_positive_limit_clamped_to_one() {
    let (engine, store) = setup(cv_seed());

    let set = engine
        .execute(CV_RESULTS, &params(&[("farm_id", "F1"), ("limit", "-4")]))
        .unwrap();

    assert_eq!(set.count, 1);
    match &store.calls()[..] {
        [Call::Query { limit, .. }] => assert_eq!(*limit, 1),
        other => panic!("unexpected calls {:?}", other),
    }
}

/// Scan limit applies to rows read, so filtered scans can under-return.
#[test]
fn test_scan_under_return_is_preserved() {
    // 2000 flights; among the first 50 rows, 10 belong to another drone
    let rows: Vec<Value> = (0..2000)
        .map(|i| {
            let drone = if i < 50 && i % 5 == 0 { "D2" } else { "D1" };
            json!({
                "flight_id": format!("fl-{:04}", i),
                "drone_id": drone,
                "flight_start": i
            })
        })
        .collect();
    let (engine, store) = setup(json!({ "agridrone-demo-flight-logs": rows }));

    let set = engine
        .execute(FLIGHTS, &params(&[("drone_id", "D1"), ("limit", "50")]))
        .unwrap();

    assert_eq!(
        store.calls(),
        vec![Call::Scan {
            table: "agridrone-demo-flight-logs".into(),
            filters: 1,
            limit: 50,
        }]
    );
    assert_eq!(set.scanned_count, 40);
    assert_eq!(set.count, 40);

    // Resorted by flight_start, most recent first
    let ids = ids(&set, "flight_id");
    assert_eq!(ids.first().map(String::as_str), Some("fl-0049"));
    assert_eq!(ids.last().map(String::as_str), Some("fl-0001"));
}

/// Missing required parameter: 400, zero store calls.
#[test]
fn test_missing_required_param_makes_no_store_call() {
    let (engine, store) = setup(cv_seed());

    let outcome = engine.execute(CV_RESULTS, &params(&[("start_date", "1000")]));
    let response = TransportResponse::from_query(outcome);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"error": "ValidationError", "message": "Missing required parameter: farm_id"})
    );
    assert!(store.calls().is_empty());
}

/// Malformed integers are rejected before the store.
#[test]
fn test_malformed_bound_makes_no_store_call() {
    let (engine, store) = setup(cv_seed());

    let err = engine
        .execute(CV_RESULTS, &params(&[("farm_id", "F1"), ("end_date", "soon")]))
        .unwrap_err();

    assert_eq!(
        err.message(),
        "Invalid parameter format: end_date must be an integer"
    );
    assert!(store.calls().is_empty());
}

// =============================================================================
// Collection Routing Tests
// =============================================================================

/// Flight date goes through the date index; other filters apply afterwards.
#[test]
fn test_flight_date_index_with_post_filters() {
    let (engine, store) = setup(json!({
        "agridrone-demo-flight-logs": [
            {"flight_id": "a", "flight_date": "2026-01-17", "farm_id": "F1", "drone_id": "D1", "flight_start": "2026-01-17T08:00:00"},
            {"flight_id": "b", "flight_date": "2026-01-17", "farm_id": "F2", "drone_id": "D1", "flight_start": "2026-01-17T09:00:00"},
            {"flight_id": "c", "flight_date": "2026-01-17", "farm_id": "F1", "drone_id": "D1", "flight_start": "2026-01-17T10:00:00"},
            {"flight_id": "d", "flight_date": "2026-01-16", "farm_id": "F1", "drone_id": "D1", "flight_start": "2026-01-16T10:00:00"}
        ]
    }));

    let set = engine
        .execute(
            FLIGHTS,
            &params(&[("flight_date", "2026-01-17"), ("farm_id", "F1"), ("drone_id", "D1")]),
        )
        .unwrap();

    assert_eq!(ids(&set, "flight_id"), vec!["c", "a"]);
    match &store.calls()[..] {
        [Call::Query { index, limit, .. }] => {
            assert_eq!(index.as_deref(), Some("flight_date-index"));
            assert_eq!(*limit, 50);
        }
        other => panic!("unexpected calls {:?}", other),
    }
}

/// Sensor id queries the base table with the timestamp as key range.
#[test]
fn test_sensor_query_by_id_and_range() {
    let (engine, store) = setup(json!({
        "agridrone-demo-sensor-data": [
            {"sensor_id": "soil-1", "timestamp": 100, "farm_id": "F1", "moisture": 30.5},
            {"sensor_id": "soil-1", "timestamp": 200, "farm_id": "F1", "moisture": 31.25},
            {"sensor_id": "soil-1", "timestamp": 300, "farm_id": "F1", "moisture": 29.0},
            {"sensor_id": "soil-2", "timestamp": 250, "farm_id": "F1", "moisture": 40.0}
        ]
    }));

    let set = engine
        .execute(
            SENSOR_DATA,
            &params(&[("sensor_id", "soil-1"), ("start_timestamp", "150")]),
        )
        .unwrap();

    assert_eq!(set.count, 2);
    assert_eq!(set.items[0]["timestamp"], json!(300.0));
    assert_eq!(set.items[1]["moisture"], json!(31.25));
    assert!(matches!(
        &store.calls()[..],
        [Call::Query { index: None, .. }]
    ));
}

/// No filters at all: one unconditional scan.
#[test]
fn test_unfiltered_sensor_request_full_scan() {
    let (engine, store) = setup(json!({
        "agridrone-demo-sensor-data": [
            {"sensor_id": "a", "timestamp": 1},
            {"sensor_id": "b", "timestamp": 3},
            {"sensor_id": "c", "timestamp": 2}
        ]
    }));

    let set = engine.execute(SENSOR_DATA, &params(&[])).unwrap();

    assert_eq!(ids(&set, "sensor_id"), vec!["b", "c", "a"]);
    assert_eq!(
        store.calls(),
        vec![Call::Scan {
            table: "agridrone-demo-sensor-data".into(),
            filters: 0,
            limit: 100,
        }]
    );
    assert_eq!(engine.metrics().snapshot().full_scans, 1);
}

/// Lower bound above upper bound is not an error.
#[test]
fn test_inverted_range_returns_nothing() {
    let (engine, _store) = setup(cv_seed());

    let set = engine
        .execute(
            CV_RESULTS,
            &params(&[("farm_id", "F1"), ("start_date", "2000"), ("end_date", "1000")]),
        )
        .unwrap();

    assert_eq!(set.count, 0);
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same request twice against an unchanged store: same ids, same order.
#[test]
fn test_pipeline_idempotent() {
    let (engine, store) = setup(cv_seed());
    let request = params(&[("farm_id", "F1"), ("limit", "4")]);

    let first = engine.execute(CV_RESULTS, &request).unwrap();
    let second = engine.execute(CV_RESULTS, &request).unwrap();

    assert_eq!(first.count, second.count);
    assert_eq!(ids(&first, "image_id"), ids(&second, "image_id"));
    assert_eq!(store.calls().len(), 2);
}

/// No post-filters and no resort: the shaper returns its input unchanged.
#[test]
fn test_shaper_identity_without_work() {
    let request = QueryRequest::new(SENSOR_DATA, 10).filter_eq("sensor_id", "s1");
    let descriptor = agridrone_query::collection::sensor_data();
    let plan = AccessPathSelector::select(&request, &descriptor);

    assert_eq!(plan.access_path, AccessPath::PrimaryKey);
    assert!(plan.post_filters.is_empty());
    assert!(plan.resort.is_none());

    let raw: Vec<Record> = [5, 9, 1, 7]
        .iter()
        .map(|ts| record_from_json(&json!({"sensor_id": "s1", "timestamp": ts})).unwrap())
        .collect();

    let set = ResultShaper::shape(raw, &plan);
    let timestamps: Vec<f64> = set
        .items
        .iter()
        .map(|item| item["timestamp"].as_f64().unwrap())
        .collect();
    assert_eq!(timestamps, vec![5.0, 9.0, 1.0, 7.0]);
}
