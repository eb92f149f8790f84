// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Datums and dimension chains.
//!
//! A datum is either a grid (a line or arc in model space, as the host draws
//! it in the current view) or a level (a horizontal plane at an elevation).
//! Datums are owned by the host and are read-only for the duration of one
//! dimensioning run.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable host identifier of a datum.
///
/// Ordering is lexicographic on the identifier text and is used for
/// deterministic tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DatumId(pub String);

impl DatumId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatumId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Discriminant for datum categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DatumCategory {
    Grid,
    Level,
}

/// Curve of a grid as drawn in a view.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCurve {
    /// Straight grid between two model points.
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    /// Arc grid in a horizontal plane, counter-clockwise from `start_angle`
    /// to `end_angle` (radians).
    Arc {
        center: Point3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl GridCurve {
    /// Start and end points of the curve.
    pub fn endpoints(&self) -> (Point3<f64>, Point3<f64>) {
        match self {
            GridCurve::Line { start, end } => (*start, *end),
            GridCurve::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => (
                arc_point(center, *radius, *start_angle),
                arc_point(center, *radius, *end_angle),
            ),
        }
    }

    /// Point halfway along the curve.
    pub fn midpoint(&self) -> Point3<f64> {
        match self {
            GridCurve::Line { start, end } => Point3::from((start.coords + end.coords) * 0.5),
            GridCurve::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let mid = start_angle + 0.5 * arc_sweep(*start_angle, *end_angle);
                arc_point(center, *radius, mid)
            }
        }
    }

    /// Length along the curve. Zero when the endpoints coincide.
    pub fn length(&self) -> f64 {
        match self {
            GridCurve::Line { start, end } => (end - start).norm(),
            GridCurve::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius.abs() * arc_sweep(*start_angle, *end_angle),
        }
    }

    /// Un-normalized direction: endpoint-to-endpoint for lines, tangent at
    /// the midpoint for arcs. May be zero for a collapsed curve.
    pub fn direction(&self) -> Vector3<f64> {
        match self {
            GridCurve::Line { start, end } => end - start,
            GridCurve::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                let mid = start_angle + 0.5 * arc_sweep(*start_angle, *end_angle);
                Vector3::new(-mid.sin(), mid.cos(), 0.0) * *radius
            }
        }
    }
}

/// Counter-clockwise sweep from `start` to `end`, in `[0, 2π)`.
fn arc_sweep(start: f64, end: f64) -> f64 {
    (end - start).rem_euclid(TAU)
}

fn arc_point(center: &Point3<f64>, radius: f64, angle: f64) -> Point3<f64> {
    Point3::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
        center.z,
    )
}

/// Geometric representation of a datum.
#[derive(Debug, Clone, PartialEq)]
pub enum DatumGeometry {
    Grid(GridCurve),
    Level { elevation: f64 },
}

/// A grid or level.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub id: DatumId,
    /// Display name ("A", "3", "Level 2"), if the host has one.
    pub name: Option<String>,
    pub geometry: DatumGeometry,
}

impl Datum {
    /// Creates a straight grid.
    pub fn grid(id: impl Into<String>, start: Point3<f64>, end: Point3<f64>) -> Self {
        Self {
            id: DatumId::new(id),
            name: None,
            geometry: DatumGeometry::Grid(GridCurve::Line { start, end }),
        }
    }

    /// Creates a level at `elevation`.
    pub fn level(id: impl Into<String>, elevation: f64) -> Self {
        Self {
            id: DatumId::new(id),
            name: None,
            geometry: DatumGeometry::Level { elevation },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(&self) -> DatumCategory {
        match self.geometry {
            DatumGeometry::Grid(_) => DatumCategory::Grid,
            DatumGeometry::Level { .. } => DatumCategory::Level,
        }
    }

    /// Grid curve, if this is a grid.
    pub fn curve(&self) -> Option<&GridCurve> {
        match &self.geometry {
            DatumGeometry::Grid(curve) => Some(curve),
            DatumGeometry::Level { .. } => None,
        }
    }

    /// Elevation, if this is a level.
    pub fn elevation(&self) -> Option<f64> {
        match self.geometry {
            DatumGeometry::Level { elevation } => Some(elevation),
            DatumGeometry::Grid(_) => None,
        }
    }
}

/// Line along which a dimension string is drawn, in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorLine {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl AnchorLine {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, if the line has length.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let d = self.end - self.start;
        let len = d.norm();
        (len > 0.0).then(|| d / len)
    }

    /// The same line moved by `offset`.
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Whether a chain measures every member or only the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChainKind {
    Individual,
    Overall,
}

/// Ordered datum references plus the line the measurement string sits on.
///
/// Always holds at least two references; constructors in the engine
/// enforce that.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionChain {
    pub kind: ChainKind,
    pub category: DatumCategory,
    pub references: Vec<DatumId>,
    pub anchor: AnchorLine,
    /// Sweep coordinate (or elevation) of each reference, same order.
    pub positions: Vec<f64>,
}

impl DimensionChain {
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn first(&self) -> Option<&DatumId> {
        self.references.first()
    }

    pub fn last(&self) -> Option<&DatumId> {
        self.references.last()
    }

    /// Distances between consecutive members.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.positions.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Distance between the first and last member.
    pub fn total_length(&self) -> f64 {
        match (self.positions.first(), self.positions.last()) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }
}
