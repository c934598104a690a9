//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 8080 },
//!   "log_level": "info",
//!   "log_json": false,
//!   "tables": { "flights": "prod-flight-logs" },
//!   "seed_file": "seed.json",
//!   "reports_dir": "reports"
//! }
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collection::CollectionRegistry;
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP bind address
    #[serde(default)]
    pub http: HttpServerConfig,

    /// `EnvFilter` directive (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// One JSON object per log line (optional, default false)
    #[serde(default)]
    pub log_json: bool,

    /// Backing table overrides, keyed by collection name
    #[serde(default)]
    pub tables: BTreeMap<String, String>,

    /// Records loaded into the in-memory store at start-up
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Root directory of stored reports (optional, default "reports")
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Directory the config was loaded from
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            log_level: default_log_level(),
            log_json: false,
            tables: BTreeMap::new(),
            seed_file: None,
            reports_dir: default_reports_dir(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.log_level.trim().is_empty() {
            return Err(CliError::config_error("log_level must not be empty"));
        }

        self.http.validate().map_err(CliError::config_error)?;

        if let Some((collection, _)) = self.tables.iter().find(|(_, table)| table.is_empty()) {
            return Err(CliError::config_error(format!(
                "Table override for '{}' must not be empty",
                collection
            )));
        }

        self.registry()?;

        Ok(())
    }

    /// Built-in collections with this config's table overrides applied
    pub fn registry(&self) -> CliResult<CollectionRegistry> {
        CollectionRegistry::builtin()
            .with_table_overrides(&self.tables)
            .map_err(|e| CliError::config_error(format!("Invalid tables: {}", e)))
    }

    /// Seed file path, resolved against the config directory
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed_file.as_ref().map(|p| self.resolve(p))
    }

    /// Reports root, resolved against the config directory
    pub fn reports_path(&self) -> PathBuf {
        self.resolve(&self.reports_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
