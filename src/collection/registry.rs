//! Collection registry
//!
//! Built once at start-up, then shared read-only (behind `Arc`) by every
//! request handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::store::{KeySchema, MemoryStore, StoreResult};

use super::descriptor::{CollectionDescriptor, ParamSpec, ParamKind};

/// CV classification results
pub const CV_RESULTS: &str = "cv-results";
/// Drone flight logs
pub const FLIGHTS: &str = "flights";
/// Field sensor readings
pub const SENSOR_DATA: &str = "sensor-data";

/// Registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

/// Read-only set of collection descriptors, keyed by collection name
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: BTreeMap<String, Arc<CollectionDescriptor>>,
}

impl CollectionRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the three farm-monitoring collections
    pub fn builtin() -> Self {
        Self::new()
            .with(cv_results())
            .with(flights())
            .with(sensor_data())
    }

    /// Adds (or replaces) a collection
    pub fn with(mut self, descriptor: CollectionDescriptor) -> Self {
        self.collections
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        self
    }

    /// Points collections at different backing tables.
    ///
    /// Every key must name a registered collection.
    pub fn with_table_overrides(
        mut self,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, RegistryError> {
        for (collection, table) in overrides {
            let current = self
                .collections
                .get(collection)
                .ok_or_else(|| RegistryError::UnknownCollection(collection.clone()))?;
            let updated = current.as_ref().clone().with_table(table.clone());
            self.collections
                .insert(collection.clone(), Arc::new(updated));
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<Arc<CollectionDescriptor>> {
        self.collections.get(name).cloned()
    }

    /// Like `get`, but unknown names are an error
    pub fn require(&self, name: &str) -> Result<Arc<CollectionDescriptor>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownCollection(name.to_string()))
    }

    /// Collection names in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CollectionDescriptor>> {
        self.collections.values()
    }

    /// Registers every collection's table layout with an in-memory store
    pub fn provision(&self, store: &MemoryStore) -> StoreResult<()> {
        for descriptor in self.iter() {
            store.create_table(descriptor.table_definition())?;
        }
        Ok(())
    }
}

/// CV results: the farm is mandatory and served by the farm/timestamp index.
pub fn cv_results() -> CollectionDescriptor {
    CollectionDescriptor::new(
        CV_RESULTS,
        "agridrone-demo-cv-results",
        KeySchema::composite("image_id", "timestamp"),
        "timestamp",
    )
    .with_index(
        "farm_id-timestamp-index",
        KeySchema::composite("farm_id", "timestamp"),
    )
    .with_param(ParamSpec::required_text("farm_id"))
    .with_param(ParamSpec::lower_bound("start_date", "timestamp"))
    .with_param(ParamSpec::upper_bound("end_date", "timestamp"))
    .with_default_limit(100)
}

/// Flight logs: keyed by flight, with a date index and no time-ordered key.
pub fn flights() -> CollectionDescriptor {
    CollectionDescriptor::new(
        FLIGHTS,
        "agridrone-demo-flight-logs",
        KeySchema::partition("flight_id"),
        "flight_start",
    )
    .with_index("flight_date-index", KeySchema::partition("flight_date"))
    .with_param(ParamSpec::optional_text("farm_id"))
    .with_param(ParamSpec::optional_text("drone_id"))
    .with_param(ParamSpec::optional_date("flight_date"))
    .with_default_limit(50)
}

/// Sensor readings: keyed by sensor and timestamp.
pub fn sensor_data() -> CollectionDescriptor {
    CollectionDescriptor::new(
        SENSOR_DATA,
        "agridrone-demo-sensor-data",
        KeySchema::composite("sensor_id", "timestamp"),
        "timestamp",
    )
    .with_param(ParamSpec::optional_text("sensor_id"))
    .with_param(ParamSpec::optional_text("farm_id"))
    .with_param(ParamSpec::lower_bound("start_timestamp", "timestamp"))
    .with_param(ParamSpec::upper_bound("end_timestamp", "timestamp"))
    .with_default_limit(100)
}
