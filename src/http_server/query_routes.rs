//! Collection query routes
//!
//! One `GET` route per registered collection, named after it
//! (`/cv-results`, `/flights`, `/sensor-data`), each answering `OPTIONS`
//! preflights too.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};

use super::response::TransportResponse;
use super::state::AppState;

/// Create query routes for every collection in the engine's registry
pub fn query_routes(state: Arc<AppState>) -> Router {
    let names: Vec<String> = state.engine.registry().names().map(str::to_string).collect();

    let mut router = Router::new();
    for name in names {
        let path = format!("/{}", name);
        let handler = move |State(state): State<Arc<AppState>>,
                            Query(params): Query<HashMap<String, String>>| {
            let collection = name.clone();
            async move { query_handler(&state, &collection, &params) }
        };
        router = router.route(&path, get(handler).options(preflight_handler));
    }

    router.with_state(state)
}

fn query_handler(
    state: &AppState,
    collection: &str,
    params: &HashMap<String, String>,
) -> TransportResponse {
    TransportResponse::from_query(state.engine.execute(collection, params))
}

/// CORS preflight handler
pub async fn preflight_handler() -> TransportResponse {
    TransportResponse::preflight()
}
