// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sweep axis: the direction along which parallel grids are ordered.

use nalgebra::{Point3, Vector2, Vector3};

use crate::view_frame::ViewFrame;

/// Unit model-space axis perpendicular to a grid family, lying in the view
/// plane, measured from the view origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepAxis {
    origin: Point3<f64>,
    axis: Vector3<f64>,
}

impl SweepAxis {
    /// Builds the axis for grids running along the view-local `direction`.
    ///
    /// The axis is `direction × normal` in model space, falling back to the
    /// view's right direction when that cross product collapses. Its sign is
    /// fixed so it points along +right, or along +up when it has no right
    /// component; ascending coordinates then read left to right or bottom to
    /// top in the view.
    pub fn for_direction(frame: &ViewFrame, direction: &Vector2<f64>, zero_tolerance: f64) -> Self {
        let grid_dir = frame.model_direction(direction);
        let crossed = grid_dir.cross(frame.normal());
        let norm = crossed.norm();
        let mut axis = if norm > zero_tolerance {
            crossed / norm
        } else {
            *frame.right()
        };

        let along_right = axis.dot(frame.right());
        let along_up = axis.dot(frame.up());
        if along_right < -zero_tolerance
            || (along_right.abs() <= zero_tolerance && along_up < 0.0)
        {
            axis = -axis;
        }

        Self {
            origin: *frame.origin(),
            axis,
        }
    }

    /// Unit axis in model space.
    pub fn axis(&self) -> &Vector3<f64> {
        &self.axis
    }

    /// Signed distance of `p` along the axis.
    #[inline]
    pub fn coordinate(&self, p: &Point3<f64>) -> f64 {
        (*p - self.origin).dot(&self.axis)
    }

    /// Moves `p` along the axis so its coordinate becomes `target`.
    #[inline]
    pub fn slide_to(&self, p: &Point3<f64>, target: f64) -> Point3<f64> {
        *p + self.axis * (target - self.coordinate(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_grids_sweep_along_right() {
        let frame = ViewFrame::plan(Point3::origin(), 100.0).unwrap();
        let sweep = SweepAxis::for_direction(&frame, &Vector2::new(0.0, -1.0), 1e-9);
        assert_relative_eq!(*sweep.axis(), Vector3::x());
        assert_relative_eq!(sweep.coordinate(&Point3::new(20.0, 7.0, 0.0)), 20.0);
    }

    #[test]
    fn horizontal_grids_sweep_along_up() {
        let frame = ViewFrame::plan(Point3::origin(), 100.0).unwrap();
        // right × normal is -up; the sign is flipped back to +up.
        let sweep = SweepAxis::for_direction(&frame, &Vector2::new(1.0, 0.0), 1e-9);
        assert_relative_eq!(*sweep.axis(), Vector3::y());
    }

    #[test]
    fn section_view_sweep_follows_view_right() {
        let frame = ViewFrame::from_right_up(
            Point3::new(0.0, 3.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::z(),
            50.0,
        )
        .unwrap();
        let sweep = SweepAxis::for_direction(&frame, &Vector2::new(0.0, 1.0), 1e-9);
        assert_relative_eq!(*sweep.axis(), Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(sweep.coordinate(&Point3::new(0.0, -7.0, 12.0)), 10.0);
    }

    #[test]
    fn slide_to_moves_only_along_axis() {
        let frame = ViewFrame::plan(Point3::origin(), 1.0).unwrap();
        let sweep = SweepAxis::for_direction(&frame, &Vector2::new(0.0, 1.0), 1e-9);
        let moved = sweep.slide_to(&Point3::new(3.0, 4.0, 0.0), -2.0);
        assert_relative_eq!(moved, Point3::new(-2.0, 4.0, 0.0));
    }
}
