// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-point pick line for the along-line mode.

use datum_dims_core::{Error, Result};
use datum_dims_geometry::view_frame::ZERO_LENGTH;
use datum_dims_geometry::ViewFrame;
use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::host::Picker;

pub const FIRST_PICK_PROMPT: &str = "Pick the first point of the dimension line";
pub const SECOND_PICK_PROMPT: &str = "Pick the second point of the dimension line";

/// Selection line given by two picked model points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickLine {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl PickLine {
    /// Rejects two coincident points.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Result<Self> {
        if (end - start).norm() <= ZERO_LENGTH {
            return Err(Error::degenerate("both picked points are the same"));
        }
        Ok(Self { start, end })
    }

    /// Endpoints in view-local X/Y.
    pub fn local_segment(&self, frame: &ViewFrame) -> (Point2<f64>, Point2<f64>) {
        (frame.to_local_2d(&self.start), frame.to_local_2d(&self.end))
    }

    /// Model Z range covered by the two points.
    pub fn z_range(&self) -> (f64, f64) {
        (self.start.z.min(self.end.z), self.start.z.max(self.end.z))
    }
}

/// Asks the picker for two points.
///
/// Cancelling either pick aborts with [`Error::PickCancelled`].
pub fn pick_line(picker: &mut dyn Picker) -> Result<PickLine> {
    let start = picker.pick_point(FIRST_PICK_PROMPT).ok_or(Error::PickCancelled)?;
    let end = picker.pick_point(SECOND_PICK_PROMPT).ok_or(Error::PickCancelled)?;
    debug!(?start, ?end, "Picked dimension line");
    PickLine::new(start, end)
}
