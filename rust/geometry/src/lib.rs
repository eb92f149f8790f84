// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Datum-Dims Geometry
//!
//! View-local geometry for datum dimensioning, using nalgebra for all
//! vector math.
//!
//! - [`ViewFrame`]: origin, orthonormal basis, crop and scale of a view
//! - [`classify_whole_view`] / [`classify_by_signature`]: direction grouping
//! - [`intersect_segments`]: parametric 2D segment test with slack
//! - [`SweepAxis`]: ordering axis perpendicular to a grid family

pub mod direction;
pub mod intersection;
pub mod sweep;
pub mod view_frame;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use direction::{
    classify_by_signature, classify_whole_view, direction_signature, project_grids,
    Classification, DirectionGroup, Orientation, ProjectedGrid, SkipReason, SkippedDatum,
};
pub use intersection::{intersect_segments, segments_cross, SegmentIntersection};
pub use sweep::SweepAxis;
pub use view_frame::{CropBox, ViewFrame};
