//! CLI command implementations
//!
//! Start-up order for every command: load config, init logging, build the
//! registry, provision and seed the store. One-shot commands then run a
//! single request and print its result.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::collection::CollectionRegistry;
use crate::executor::QueryEngine;
use crate::http_server::{AppState, HttpServer, TransportResponse};
use crate::observability::{init_logging, Event};
use crate::store::{LocalBlobStore, MemoryStore};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_raw};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query {
            config,
            collection,
            params,
        } => query(&config, &collection, params),
        Command::Explain {
            config,
            collection,
            params,
        } => explain(&config, &collection, params),
    }
}

/// Start the HTTP server and serve until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = boot(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.http.validate().map_err(CliError::config_error)?;
    }

    let state = build_state(&config)?;
    let server = HttpServer::with_config(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Execute one query, print the response body, fail on a non-200 status
pub fn query(
    config_path: &Path,
    collection: &str,
    params: Vec<(String, String)>,
) -> CliResult<()> {
    let config = boot(config_path)?;
    let state = build_state(&config)?;

    let params: HashMap<String, String> = params.into_iter().collect();
    let response = TransportResponse::from_query(state.engine.execute(collection, &params));
    print_response(&response)?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(CliError::query_failed(response.status().as_u16()))
    }
}

/// Print the plan for one query without reading the store
pub fn explain(
    config_path: &Path,
    collection: &str,
    params: Vec<(String, String)>,
) -> CliResult<()> {
    let config = boot(config_path)?;
    let registry = Arc::new(config.registry()?);
    let engine = QueryEngine::new(registry, Arc::new(MemoryStore::new()));

    let params: HashMap<String, String> = params.into_iter().collect();
    let plan = engine.explain(collection, &params);
    write_json(&plan.to_json())?;

    if plan.accepted {
        Ok(())
    } else {
        Err(CliError::query_failed(400))
    }
}

/// Loads config and installs logging
fn boot(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;

    init_logging(&config.log_level, config.log_json)
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        "configuration loaded"
    );
    Ok(config)
}

/// Builds the shared handler state: registry, seeded store, report blobs
pub fn build_state(config: &Config) -> CliResult<Arc<AppState>> {
    let registry = Arc::new(config.registry()?);
    let store = seeded_store(&registry, config)?;
    let blobs = LocalBlobStore::new(config.reports_path());

    Ok(Arc::new(AppState::new(
        registry,
        Arc::new(store),
        Arc::new(blobs),
    )))
}

fn seeded_store(registry: &CollectionRegistry, config: &Config) -> CliResult<MemoryStore> {
    let store = MemoryStore::new();
    registry
        .provision(&store)
        .map_err(|e| CliError::boot_failed(format!("Failed to provision tables: {}", e)))?;

    if let Some(seed_path) = config.seed_path() {
        let records = store
            .seed_from_file(&seed_path)
            .map_err(|e| CliError::boot_failed(format!("Failed to seed store: {}", e)))?;
        info!(
            event = %Event::StoreSeeded,
            path = %seed_path.display(),
            records,
            "store seeded"
        );
    }

    Ok(store)
}

fn print_response(response: &TransportResponse) -> CliResult<()> {
    match response.body_json() {
        Some(body) => write_json(&body),
        None => write_raw(response.body()),
    }
}
