// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Datum-Dims Server - HTTP API for automatic datum dimensioning.
//!
//! Each request carries a snapshot of one view with its grids and levels;
//! the server builds the dimension chains and returns them together with
//! the datums that were skipped.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/dimensions/automatic` - Whole-view grid and level dimensions
//! - `POST /api/v1/dimensions/along-line` - Dimensions along a picked line

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod types;

use config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Builds the router with all routes and middleware.
fn app(state: AppState) -> Router {
    let body_limit = state.config.max_body_kb * 1024;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Dimension endpoints
        .route("/api/v1/dimensions/automatic", post(routes::dimensions::automatic))
        .route("/api/v1/dimensions/along-line", post(routes::dimensions::along_line))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,datum_dims_server=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    tracing::info!(
        port = config.port,
        max_body_kb = config.max_body_kb,
        length_unit = %config.length_unit,
        individual_offset_mm = config.individual_offset_mm,
        overall_offset_mm = config.overall_offset_mm,
        "Starting Datum-Dims Server"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}
