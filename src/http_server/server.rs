//! # HTTP Server
//!
//! One router for the whole read API:
//!
//! | Path                     | Served by            |
//! |--------------------------|----------------------|
//! | `/{collection}`          | query routes         |
//! | `/reports/:date`         | report pass-through  |
//! | `/health`                | health check         |
//! | `/observability/*`       | health and metrics   |

use std::sync::Arc;

use axum::http::{StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::observability::Event;

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::query_routes::query_routes;
use super::report_routes::report_routes;
use super::response::TransportResponse;
use super::state::AppState;

/// Read API server bound to one listener config
pub struct HttpServer {
    config: HttpServerConfig,
    collections: Vec<String>,
    router: Router,
}

impl HttpServer {
    /// Server on the default listener
    pub fn new(state: Arc<AppState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    pub fn with_config(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let collections = state
            .engine
            .registry()
            .names()
            .map(str::to_string)
            .collect();
        let router = Self::build_router(state);
        Self {
            config,
            collections,
            router,
        }
    }

    /// Every route, wrapped in request tracing
    pub fn build_router(state: Arc<AppState>) -> Router {
        Router::new()
            .merge(health_routes(Arc::clone(&state)))
            .merge(query_routes(Arc::clone(&state)))
            .merge(report_routes(Arc::clone(&state)))
            .nest("/observability", observability_routes(state))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
    }

    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }

    /// Collection routes this server answers
    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// Consumes the server, keeping only its router
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds the listener and serves until the process stops
    pub async fn start(self) -> std::io::Result<()> {
        let addr = self.config.resolve()?;
        let listener = TcpListener::bind(addr).await?;

        info!(
            event = %Event::ServerStart,
            %addr,
            collections = ?self.collections,
            "read API listening"
        );

        axum::serve(listener, self.router).await
    }
}

/// Unrouted paths still get the JSON error body and CORS headers
async fn not_found_handler(uri: Uri) -> TransportResponse {
    TransportResponse::error(
        StatusCode::NOT_FOUND,
        "NotFound",
        &format!("No route for {}", uri.path()),
    )
}
