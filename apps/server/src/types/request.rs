// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use datum_dims_core::{DatumTarget, DimensionConfig, DimensionScope};
use datum_dims_engine::SceneSnapshot;
use serde::Deserialize;

/// POST /api/v1/dimensions/automatic
#[derive(Debug, Clone, Deserialize)]
pub struct AutomaticRequest {
    pub scene: SceneSnapshot,
    /// Defaults to grids and levels.
    #[serde(default)]
    pub scope: DimensionScope,
    /// Replaces the server's default configuration when present.
    #[serde(default)]
    pub config: Option<DimensionConfig>,
}

/// Two picked model points.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PickPoints {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

/// POST /api/v1/dimensions/along-line
#[derive(Debug, Clone, Deserialize)]
pub struct AlongLineRequest {
    pub scene: SceneSnapshot,
    pub target: DatumTarget,
    pub pick: PickPoints,
    #[serde(default)]
    pub include_overall: bool,
    #[serde(default)]
    pub config: Option<DimensionConfig>,
}
