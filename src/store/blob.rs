//! # Blob Store
//!
//! Read-only object access for generated reports.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::errors::{StoreError, StoreResult};

/// Object store read interface
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Fetch the object stored under `key`; `Ok(None)` when absent
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
}

/// Local filesystem blob backend, one file per key under `root`
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a key below the root. Keys may not escape the root.
    fn full_path(&self, key: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(StoreError::InvalidPath(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for LocalBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let full_path = self.full_path(key)?;

        match fs::read(&full_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}
