//! Store boundary for the query service
//!
//! The key-value store and the report blob store are external collaborators.
//! This module defines the interfaces the query path calls against, the
//! storage-native value model, and in-process implementations of both.

mod adapter;
mod blob;
mod errors;
mod memory;
mod value;

pub use adapter::StoreAdapter;
pub use blob::{BlobStore, LocalBlobStore};
pub use errors::{StoreError, StoreResult};
pub use memory::{KeySchema, MemoryStore, TableDefinition};
pub use value::{compare_values, record_from_json, AttributeValue, Record};
