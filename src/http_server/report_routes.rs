//! Report routes
//!
//! `GET /reports/:date?farm_id=..&format=..` returns the stored report body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};

use super::query_routes::preflight_handler;
use super::response::TransportResponse;
use super::state::AppState;

/// Create report routes
pub fn report_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/reports/:date",
            get(report_handler).options(preflight_handler),
        )
        .with_state(state)
}

async fn report_handler(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> TransportResponse {
    let outcome = state.reports.fetch(
        &date,
        params.get("farm_id").map(String::as_str),
        params.get("format").map(String::as_str),
    );
    TransportResponse::from_report(outcome)
}
