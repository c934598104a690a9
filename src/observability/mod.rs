//! Observability
//!
//! - `tracing` subscriber setup (plain or JSON lines)
//! - fixed event names for lifecycle and per-request log lines
//! - atomic counters exposed as JSON
//!
//! Observability is read-only: nothing here changes a query's outcome.

mod events;
mod logging;
mod metrics;

pub use events::Event;
pub use logging::{init_logging, LoggingError};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
