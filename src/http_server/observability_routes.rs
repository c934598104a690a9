//! Health and metrics endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

use super::state::AppState;

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Collections with a query route
    pub collections: Vec<String>,
}

impl HealthResponse {
    fn for_state(state: &AppState) -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            collections: state
                .engine
                .registry()
                .names()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Routes nested under `/observability`
pub fn observability_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Root-level `/health`
pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::for_state(&state))
}

/// Counter snapshot
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.metrics.to_json())
}
