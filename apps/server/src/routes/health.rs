// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// Unit that submitted scenes are interpreted in by default.
    pub length_unit: String,
    pub individual_offset_mm: f64,
    pub overall_offset_mm: f64,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "datum-dims-server",
        length_unit: state.config.length_unit.to_string(),
        individual_offset_mm: state.config.individual_offset_mm,
        overall_offset_mm: state.config.overall_offset_mm,
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "datum-dims-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Automatic grid and level dimensioning",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/dimensions/automatic",
                description: "Dimension every grid family and the levels of a cropped view",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/dimensions/along-line",
                description: "Dimension the grids or levels collected by a picked line",
            },
        ],
    })
}
