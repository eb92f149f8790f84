// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datum_dims_core::Error as DimensionError;
use datum_dims_engine::SceneError;
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] JsonRejection),

    #[error("Invalid scene: {0}")]
    InvalidScene(#[from] SceneError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Dimension(#[from] DimensionError),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    /// HTTP status and machine-readable code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST"),
            ApiError::InvalidScene(_) => (StatusCode::BAD_REQUEST, "INVALID_SCENE"),
            ApiError::InvalidConfig(_) => (StatusCode::BAD_REQUEST, "INVALID_CONFIG"),
            ApiError::Dimension(err) => dimension_status(err),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        }
    }
}

fn dimension_status(err: &DimensionError) -> (StatusCode, &'static str) {
    let unprocessable = StatusCode::UNPROCESSABLE_ENTITY;
    match err {
        DimensionError::NoActiveView => (unprocessable, "NO_ACTIVE_VIEW"),
        DimensionError::TemplateView => (unprocessable, "TEMPLATE_VIEW"),
        DimensionError::CropNotActive => (unprocessable, "CROP_NOT_ACTIVE"),
        DimensionError::UnsupportedViewType { .. } => (unprocessable, "UNSUPPORTED_VIEW_TYPE"),
        DimensionError::InsufficientCandidates { .. } => (unprocessable, "INSUFFICIENT_CANDIDATES"),
        DimensionError::GeometryDegenerate(_) => (unprocessable, "GEOMETRY_DEGENERATE"),
        DimensionError::PickCancelled => (StatusCode::CONFLICT, "PICK_CANCELLED"),
        DimensionError::Mutation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "MUTATION_FAILED"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::debug!(code, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
