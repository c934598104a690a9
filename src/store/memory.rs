//! In-memory key-value store
//!
//! Mirrors the read semantics of the hosted store the query handlers were
//! written against:
//! - keyed queries match the partition value, apply at most one sort-key
//!   condition and come back ordered by the schema's sort key
//! - scans read rows in insertion order and apply `limit` to the rows
//!   read, *before* evaluating filter conditions
//! - secondary indexes are sparse: records without the index partition
//!   attribute are not visible through the index

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde_json::Value;

use crate::executor::PredicateFilter;
use crate::planner::{KeyConditions, Predicate};

use super::adapter::StoreAdapter;
use super::errors::{StoreError, StoreResult};
use super::value::{compare_values, record_from_json, AttributeValue, Record};

/// Partition key plus optional sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: Option<String>,
}

impl KeySchema {
    /// Partition-only key schema
    pub fn partition(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Composite key schema
    pub fn composite(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: Some(sort_key.into()),
        }
    }
}

/// Table layout: base key schema plus named secondary indexes
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub name: String,
    pub key_schema: KeySchema,
    pub indexes: BTreeMap<String, KeySchema>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, key_schema: KeySchema) -> Self {
        Self {
            name: name.into(),
            key_schema,
            indexes: BTreeMap::new(),
        }
    }

    pub fn with_index(mut self, name: impl Into<String>, key_schema: KeySchema) -> Self {
        self.indexes.insert(name.into(), key_schema);
        self
    }
}

#[derive(Debug)]
struct Table {
    definition: TableDefinition,
    items: Vec<Record>,
    /// Primary key -> position in `items`
    positions: HashMap<Vec<AttributeValue>, usize>,
}

impl Table {
    fn new(definition: TableDefinition) -> Self {
        Self {
            definition,
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Rebuilds the key positions after the key schema changed
    fn reindex(&mut self) -> StoreResult<()> {
        let mut positions = HashMap::with_capacity(self.items.len());
        for (pos, item) in self.items.iter().enumerate() {
            positions.entry(self.primary_key_of(item)?).or_insert(pos);
        }
        self.positions = positions;
        Ok(())
    }

    /// Inserts or replaces by primary key
    fn upsert(&mut self, record: Record) -> StoreResult<()> {
        let key = self.primary_key_of(&record)?;
        match self.positions.get(&key) {
            Some(&pos) => self.items[pos] = record,
            None => {
                self.positions.insert(key, self.items.len());
                self.items.push(record);
            }
        }
        Ok(())
    }

    fn primary_key_of(&self, record: &Record) -> StoreResult<Vec<AttributeValue>> {
        let schema = &self.definition.key_schema;
        let mut key = Vec::with_capacity(2);
        for attr in std::iter::once(&schema.partition_key).chain(schema.sort_key.iter()) {
            let value = record
                .get(attr)
                .ok_or_else(|| StoreError::MissingKeyAttribute {
                    table: self.definition.name.clone(),
                    attribute: attr.clone(),
                })?;
            key.push(value.clone());
        }
        Ok(key)
    }

    fn schema_for(&self, index: Option<&str>) -> StoreResult<&KeySchema> {
        match index {
            None => Ok(&self.definition.key_schema),
            Some(name) => self
                .definition
                .indexes
                .get(name)
                .ok_or_else(|| StoreError::IndexNotFound {
                    table: self.definition.name.clone(),
                    index: name.to_string(),
                }),
        }
    }
}

/// Thread-safe in-memory store; readers never block each other
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table. Re-registering an existing name replaces its layout
    /// and keeps its rows.
    pub fn create_table(&self, definition: TableDefinition) -> StoreResult<()> {
        let mut tables = self.write_tables()?;
        match tables.get_mut(&definition.name) {
            Some(table) => {
                table.definition = definition;
                table.reindex()?;
            }
            None => {
                tables.insert(definition.name.clone(), Table::new(definition));
            }
        }
        Ok(())
    }

    /// Stores a record, replacing any record with the same primary key.
    pub fn put_item(&self, table: &str, record: Record) -> StoreResult<()> {
        let mut tables = self.write_tables()?;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        table.upsert(record)
    }

    /// Number of records held by a table
    pub fn item_count(&self, table: &str) -> StoreResult<usize> {
        let tables = self.read_tables()?;
        tables
            .get(table)
            .map(|t| t.items.len())
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }

    /// Loads records from a JSON document shaped `{ "<table>": [record, ...] }`.
    ///
    /// Tables must already be registered. Returns the number of records loaded.
    pub fn seed_from_json(&self, document: &Value) -> StoreResult<usize> {
        let tables = document.as_object().ok_or_else(|| {
            StoreError::Malformed("seed document must be an object of tables".into())
        })?;

        let mut loaded = 0;
        for (table, rows) in tables {
            let rows = rows.as_array().ok_or_else(|| {
                StoreError::Malformed(format!("seed rows for '{}' must be an array", table))
            })?;
            for row in rows {
                self.put_item(table, record_from_json(row)?)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Loads a seed file from disk
    pub fn seed_from_file(&self, path: &Path) -> StoreResult<usize> {
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::IoError(format!("{}: {}", path.display(), e)))?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::Malformed(format!("{}: {}", path.display(), e)))?;
        self.seed_from_json(&document)
    }

    fn read_tables(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Table>>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".into()))
    }

    fn write_tables(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Table>>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".into()))
    }
}

impl StoreAdapter for MemoryStore {
    fn query(
        &self,
        table: &str,
        index: Option<&str>,
        key_conditions: &KeyConditions,
        limit: usize,
        scan_forward: bool,
    ) -> StoreResult<Vec<Record>> {
        let tables = self.read_tables()?;
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        let schema = table.schema_for(index)?;

        if key_conditions.partition.field != schema.partition_key {
            return Err(StoreError::Malformed(format!(
                "key condition on '{}' does not match partition key '{}'",
                key_conditions.partition.field, schema.partition_key
            )));
        }
        if let Some(sort) = &key_conditions.sort {
            if schema.sort_key.as_deref() != Some(sort.field.as_str()) {
                return Err(StoreError::Malformed(format!(
                    "key condition on '{}' does not match the sort key",
                    sort.field
                )));
            }
        }

        let mut matched: Vec<&Record> = table
            .items
            .iter()
            .filter(|record| PredicateFilter::matches(record, key_conditions.predicates()))
            .collect();

        if let Some(sort_key) = &schema.sort_key {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(sort_key), b.get(sort_key));
                if scan_forward {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        Ok(matched.into_iter().take(limit).cloned().collect())
    }

    fn scan(
        &self,
        table: &str,
        filter_conditions: &[Predicate],
        limit: usize,
    ) -> StoreResult<Vec<Record>> {
        let tables = self.read_tables()?;
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        Ok(table
            .items
            .iter()
            .take(limit)
            .filter(|record| PredicateFilter::matches(record, filter_conditions))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;
    use serde_json::json;

    fn sensor_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_table(TableDefinition::new(
                "sensors",
                KeySchema::composite("sensor_id", "timestamp"),
            ))
            .unwrap();
        store
            .seed_from_json(&json!({
                "sensors": [
                    {"sensor_id": "s1", "timestamp": 100, "farm_id": "F1"},
                    {"sensor_id": "s1", "timestamp": 300, "farm_id": "F1"},
                    {"sensor_id": "s2", "timestamp": 200, "farm_id": "F2"},
                    {"sensor_id": "s1", "timestamp": 200, "farm_id": "F1"}
                ]
            }))
            .unwrap();
        store
    }

    fn timestamps(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| {
                r["timestamp"]
                    .as_decimal()
                    .and_then(|d| d.to_i64())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_query_orders_by_sort_key() {
        let store = sensor_store();
        let keys = KeyConditions::partition(Predicate::eq("sensor_id", "s1"));

        let forward = store.query("sensors", None, &keys, 10, true).unwrap();
        assert_eq!(timestamps(&forward), vec![100, 200, 300]);

        let backward = store.query("sensors", None, &keys, 10, false).unwrap();
        assert_eq!(timestamps(&backward), vec![300, 200, 100]);
    }

    #[test]
    fn test_query_sort_key_range_and_limit() {
        let store = sensor_store();
        let keys = KeyConditions::partition(Predicate::eq("sensor_id", "s1"))
            .with_sort(Predicate::gte("timestamp", 200i64));

        let result = store.query("sensors", None, &keys, 1, false).unwrap();
        assert_eq!(timestamps(&result), vec![300]);
    }

    #[test]
    fn test_scan_limit_applies_before_filter() {
        let store = sensor_store();
        let filters = vec![Predicate::eq("farm_id", "F2")];

        // F2's only row is the third one; reading two rows never reaches it
        let result = store.scan("sensors", &filters, 2).unwrap();
        assert!(result.is_empty());

        let result = store.scan("sensors", &filters, 3).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_put_item_replaces_same_key() {
        let store = sensor_store();
        store
            .put_item(
                "sensors",
                record_from_json(&json!({"sensor_id": "s1", "timestamp": 100, "farm_id": "F9"}))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(store.item_count("sensors").unwrap(), 4);
    }

    #[test]
    fn test_bulk_seed_replaces_by_key() {
        let store = MemoryStore::new();
        store
            .create_table(TableDefinition::new("flights", KeySchema::partition("flight_id")))
            .unwrap();

        // 3000 puts over 1000 distinct keys; the last write per key wins
        let rows: Vec<Value> = (0..3000)
            .map(|i| json!({"flight_id": format!("fl-{}", i % 1000), "round": i / 1000}))
            .collect();
        assert_eq!(store.seed_from_json(&json!({ "flights": rows })).unwrap(), 3000);
        assert_eq!(store.item_count("flights").unwrap(), 1000);

        let all = store.scan("flights", &[], 1000).unwrap();
        assert_eq!(all[0]["flight_id"], AttributeValue::string("fl-0"));
        assert!(all.iter().all(|r| r["round"] == AttributeValue::integer(2)));
    }

    #[test]
    fn test_reregister_reindexes_rows() {
        let store = sensor_store();
        store
            .create_table(TableDefinition::new(
                "sensors",
                KeySchema::composite("sensor_id", "timestamp"),
            ))
            .unwrap();
        store
            .put_item(
                "sensors",
                record_from_json(&json!({"sensor_id": "s2", "timestamp": 200, "farm_id": "F3"}))
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(store.item_count("sensors").unwrap(), 4);
    }

    #[test]
    fn test_put_item_requires_key_attributes() {
        let store = sensor_store();
        let err = store
            .put_item("sensors", record_from_json(&json!({"sensor_id": "s1"})).unwrap())
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingKeyAttribute { .. }));
    }

    #[test]
    fn test_sparse_index() {
        let store = MemoryStore::new();
        store
            .create_table(
                TableDefinition::new("flights", KeySchema::partition("flight_id"))
                    .with_index("flight_date-index", KeySchema::partition("flight_date")),
            )
            .unwrap();
        store
            .seed_from_json(&json!({
                "flights": [
                    {"flight_id": "a", "flight_date": "2026-01-10"},
                    {"flight_id": "b"},
                    {"flight_id": "c", "flight_date": "2026-01-10"}
                ]
            }))
            .unwrap();

        let keys = KeyConditions::partition(Predicate::eq("flight_date", "2026-01-10"));
        let result = store
            .query("flights", Some("flight_date-index"), &keys, 10, true)
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_unknown_table_and_index() {
        let store = sensor_store();
        let keys = KeyConditions::partition(Predicate::eq("sensor_id", "s1"));

        assert!(matches!(
            store.query("nope", None, &keys, 10, true),
            Err(StoreError::TableNotFound(_))
        ));
        assert!(matches!(
            store.query("sensors", Some("missing-index"), &keys, 10, true),
            Err(StoreError::IndexNotFound { .. })
        ));
    }

    #[test]
    fn test_mismatched_key_condition_rejected() {
        let store = sensor_store();
        let keys = KeyConditions::partition(Predicate::eq("farm_id", "F1"));
        assert!(matches!(
            store.query("sensors", None, &keys, 10, true),
            Err(StoreError::Malformed(_))
        ));
    }
}
