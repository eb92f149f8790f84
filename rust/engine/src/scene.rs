// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host: one view plus the grids and levels around it.
//!
//! A [`Scene`] is built from a JSON [`SceneSnapshot`] (points as `[x, y, z]`
//! arrays) and answers the [`ViewAccessor`] and [`DatumProvider`] queries
//! the engine makes. Visibility follows the crop box when it is active.

use datum_dims_core::{Datum, DatumCategory, DatumGeometry, DatumId, GridCurve, ViewKind};
use datum_dims_geometry::{CropBox, ViewFrame};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::host::{DatumProvider, ViewAccessor};

/// Errors raised while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Invalid(#[from] datum_dims_core::Error),

    #[error("duplicate datum id: {0}")]
    DuplicateDatum(DatumId),
}

/// Serialized view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub id: String,
    pub kind: ViewKind,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub origin: [f64; 3],
    pub right: [f64; 3],
    pub up: [f64; 3],
    /// Defaults to `right × up`.
    #[serde(default)]
    pub normal: Option<[f64; 3]>,
    pub scale: f64,
    #[serde(default)]
    pub crop: Option<CropSnapshot>,
    #[serde(default = "default_crop_active")]
    pub crop_active: bool,
}

fn default_crop_active() -> bool {
    true
}

/// Serialized crop rectangle in view-local X/Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSnapshot {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

/// Serialized grid curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveSnapshot {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub id: DatumId,
    #[serde(default)]
    pub name: Option<String>,
    pub curve: CurveSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub id: DatumId,
    #[serde(default)]
    pub name: Option<String>,
    pub elevation: f64,
}

/// Serialized scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub view: ViewSnapshot,
    #[serde(default)]
    pub grids: Vec<GridSnapshot>,
    #[serde(default)]
    pub levels: Vec<LevelSnapshot>,
}

fn point([x, y, z]: [f64; 3]) -> Point3<f64> {
    Point3::new(x, y, z)
}

fn vector([x, y, z]: [f64; 3]) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

/// The view of a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneView {
    id: String,
    kind: ViewKind,
    template: bool,
    frame: ViewFrame,
    crop: Option<CropBox>,
    crop_active: bool,
}

impl SceneView {
    /// A non-template view. A crop attached to `frame` becomes the active crop box.
    pub fn new(id: impl Into<String>, kind: ViewKind, frame: ViewFrame) -> Self {
        let crop = frame.crop().copied();
        Self {
            id: id.into(),
            kind,
            template: false,
            crop_active: crop.is_some(),
            crop,
            frame,
        }
    }

    /// Sets an active crop box.
    pub fn with_crop(mut self, crop: CropBox) -> Self {
        self.crop = Some(crop);
        self.crop_active = true;
        self
    }

    /// Keeps the crop box but switches cropping off.
    pub fn with_crop_inactive(mut self) -> Self {
        self.crop_active = false;
        self
    }

    pub fn as_template(mut self) -> Self {
        self.template = true;
        self
    }

    fn active_crop(&self) -> Option<&CropBox> {
        self.crop.as_ref().filter(|_| self.crop_active)
    }
}

impl ViewAccessor for SceneView {
    fn view_id(&self) -> &str {
        &self.id
    }

    fn view_kind(&self) -> ViewKind {
        self.kind
    }

    fn is_template(&self) -> bool {
        self.template
    }

    fn view_frame(&self) -> datum_dims_core::Result<ViewFrame> {
        let frame = self.frame.clone();
        Ok(match self.active_crop() {
            Some(crop) => frame.with_crop(*crop),
            None => frame,
        })
    }

    fn is_crop_active(&self) -> bool {
        self.active_crop().is_some()
    }

    fn crop_extents(&self) -> Option<CropBox> {
        self.crop
    }
}

/// A view with its datums.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    view: SceneView,
    grids: Vec<Datum>,
    levels: Vec<Datum>,
}

impl Scene {
    pub fn new(view: SceneView) -> Self {
        Self {
            view,
            grids: Vec::new(),
            levels: Vec::new(),
        }
    }

    pub fn with_grid(mut self, grid: Datum) -> Self {
        self.grids.push(grid);
        self
    }

    pub fn with_level(mut self, level: Datum) -> Self {
        self.levels.push(level);
        self
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn grids(&self) -> &[Datum] {
        &self.grids
    }

    pub fn levels(&self) -> &[Datum] {
        &self.levels
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    /// Validates the view basis and crop box and converts every datum.
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Result<Self, SceneError> {
        let v = snapshot.view;
        let right = vector(v.right);
        let up = vector(v.up);
        let normal = v.normal.map(vector).unwrap_or_else(|| right.cross(&up));
        let frame = ViewFrame::new(point(v.origin), right, up, normal, v.scale)?;

        let crop = v
            .crop
            .map(|c| CropBox::new(Point2::from(c.min), Point2::from(c.max)))
            .transpose()?;

        let view = SceneView {
            id: v.id,
            kind: v.kind,
            template: v.is_template,
            frame,
            crop,
            crop_active: v.crop_active && crop.is_some(),
        };

        let grids = snapshot.grids.into_iter().map(|g| {
            let curve = match g.curve {
                CurveSnapshot::Line { start, end } => GridCurve::Line {
                    start: point(start),
                    end: point(end),
                },
                CurveSnapshot::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => GridCurve::Arc {
                    center: point(center),
                    radius,
                    start_angle,
                    end_angle,
                },
            };
            Datum {
                id: g.id,
                name: g.name,
                geometry: DatumGeometry::Grid(curve),
            }
        });
        let levels = snapshot.levels.into_iter().map(|l| Datum {
            id: l.id,
            name: l.name,
            geometry: DatumGeometry::Level {
                elevation: l.elevation,
            },
        });

        let mut scene = Scene::new(view);
        let mut seen = rustc_hash::FxHashSet::default();
        for datum in grids.chain(levels) {
            if !seen.insert(datum.id.clone()) {
                return Err(SceneError::DuplicateDatum(datum.id));
            }
            match datum.category() {
                DatumCategory::Grid => scene.grids.push(datum),
                DatumCategory::Level => scene.levels.push(datum),
            }
        }
        Ok(scene)
    }
}

impl DatumProvider for Scene {
    /// Grids whose drawn segment reaches into the crop box (all grids when
    /// the view is not cropped).
    fn grids_visible_in(&self, view: &dyn ViewAccessor) -> Vec<Datum> {
        let Ok(frame) = view.view_frame() else {
            return Vec::new();
        };
        let crop = frame.crop().filter(|_| view.is_crop_active());
        self.grids
            .iter()
            .filter(|grid| {
                let (Some(crop), Some(curve)) = (crop, grid.curve()) else {
                    return true;
                };
                let (start, end) = curve.endpoints();
                let (a, b) = (frame.to_local_2d(&start), frame.to_local_2d(&end));
                let mid = frame.to_local_2d(&curve.midpoint());
                crop.overlaps_segment(&a, &b) || crop.contains(&mid)
            })
            .cloned()
            .collect()
    }

    /// Levels whose elevation falls within the crop box's vertical extent.
    ///
    /// Views that do not look sideways (no model Z in their up direction)
    /// show every level.
    fn levels_visible_in(&self, view: &dyn ViewAccessor) -> Vec<Datum> {
        let Ok(frame) = view.view_frame() else {
            return Vec::new();
        };
        let up_z = frame.up().z;
        let crop = frame
            .crop()
            .filter(|_| view.is_crop_active() && up_z.abs() > 1e-9);
        self.levels
            .iter()
            .filter(|level| {
                let (Some(crop), Some(elevation)) = (crop, level.elevation()) else {
                    return true;
                };
                let local_y = (elevation - frame.origin().z) * up_z;
                local_y >= crop.min.y && local_y <= crop.max.y
            })
            .cloned()
            .collect()
    }
}
