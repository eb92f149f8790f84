// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimensioning endpoints.
//!
//! Each request carries a scene snapshot. The full command runs on the
//! blocking pool against a fresh [`RecordingDocument`], so a response is
//! returned only for a committed transaction.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use datum_dims_core::{DimensionConfig, Error as DimensionError};
use datum_dims_engine::{
    dimension_along_picked_line, dimension_view, AlongLineOptions, RecordingDocument, Scene,
    ScriptedPicker, ViewAccessor,
};
use datum_dims_geometry::Point3;

use crate::error::ApiError;
use crate::types::{AlongLineRequest, AutomaticRequest, DimensionResponse};
use crate::AppState;

fn resolve_config(
    state: &AppState,
    requested: Option<DimensionConfig>,
) -> Result<DimensionConfig, ApiError> {
    let config = requested.unwrap_or_else(|| state.config.dimension_config());
    config
        .validate()
        .map_err(|err| ApiError::InvalidConfig(err.to_string()))?;
    Ok(config)
}

/// POST /api/v1/dimensions/automatic - Dimension a whole cropped view.
pub async fn automatic(
    State(state): State<AppState>,
    payload: Result<Json<AutomaticRequest>, JsonRejection>,
) -> Result<Json<DimensionResponse>, ApiError> {
    let Json(request) = payload?;
    let config = resolve_config(&state, request.config)?;
    let scene = Scene::from_snapshot(request.scene)?;
    let scope = request.scope;

    tracing::info!(
        view = scene.view().view_id(),
        %scope,
        grids = scene.grids().len(),
        levels = scene.levels().len(),
        "Automatic dimension request"
    );

    let response = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let mut document = RecordingDocument::new();
        let report = dimension_view(Some(scene.view()), &scene, &mut document, scope, &config)?;
        Ok::<_, DimensionError>(DimensionResponse::from_report(
            scene.view().view_id().to_string(),
            report,
            start.elapsed().as_millis() as u64,
        ))
    })
    .await??;

    Ok(Json(response))
}

/// POST /api/v1/dimensions/along-line - Dimension along two picked points.
pub async fn along_line(
    State(state): State<AppState>,
    payload: Result<Json<AlongLineRequest>, JsonRejection>,
) -> Result<Json<DimensionResponse>, ApiError> {
    let Json(request) = payload?;
    let config = resolve_config(&state, request.config)?;
    let scene = Scene::from_snapshot(request.scene)?;
    let target = request.target;
    let options = AlongLineOptions {
        include_overall: request.include_overall,
    };
    let [sx, sy, sz] = request.pick.start;
    let [ex, ey, ez] = request.pick.end;
    let mut picker =
        ScriptedPicker::from_points([Point3::new(sx, sy, sz), Point3::new(ex, ey, ez)]);

    tracing::info!(
        view = scene.view().view_id(),
        ?target,
        include_overall = options.include_overall,
        "Along-line dimension request"
    );

    let response = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let mut document = RecordingDocument::new();
        let report = dimension_along_picked_line(
            Some(scene.view()),
            &scene,
            &mut picker,
            &mut document,
            target,
            &options,
            &config,
        )?;
        Ok::<_, DimensionError>(DimensionResponse::from_report(
            scene.view().view_id().to_string(),
            report,
            start.elapsed().as_millis() as u64,
        ))
    })
    .await??;

    Ok(Json(response))
}
