//! # HTTP Server Module
//!
//! Axum server exposing the read API.
//!
//! # Endpoints
//!
//! - `/cv-results`, `/flights`, `/sensor-data` - collection queries
//! - `/reports/:date` - daily report pass-through
//! - `/health` - Health check
//! - `/observability/*` - Metrics and monitoring

pub mod config;
pub mod observability_routes;
pub mod query_routes;
pub mod report_routes;
pub mod response;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use response::TransportResponse;
pub use server::HttpServer;
pub use state::AppState;
