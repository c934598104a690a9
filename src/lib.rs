//! agridrone-query - read path for farm-monitoring data
//!
//! Serves drone flight logs, CV classification results and field sensor
//! readings from a partitioned key-value store, plus stored daily reports.
//!
//! Every request goes through the same pipeline:
//!
//! ```text
//! raw params -> ParamNormalizer -> AccessPathSelector -> StoreAdapter
//!            -> ResultShaper -> TransportResponse
//! ```

pub mod cli;
pub mod collection;
pub mod executor;
pub mod http_server;
pub mod observability;
pub mod planner;
pub mod reports;
pub mod store;
