// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D segment intersection with parametric slack.
//!
//! Used by the pick-a-line mode to decide which grids the user's line
//! crosses. The slack lets a pick line that stops a little short of (or
//! runs a little past) a grid's drawn extents still count as crossing it.

use nalgebra::{Point2, Vector2};

/// Where two segments cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    /// Parameter along the first segment (0 at `a0`, 1 at `a1`).
    pub t: f64,
    /// Parameter along the second segment (0 at `b0`, 1 at `b1`).
    pub u: f64,
    /// Crossing point of the supporting lines.
    pub point: Point2<f64>,
}

#[inline]
fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Intersects segments `a0→a1` and `b0→b1`.
///
/// Returns `None` when the segments are parallel (`|denom| <= zero_tolerance`)
/// or when either parameter falls outside `[-slack, 1 + slack]`.
pub fn intersect_segments(
    a0: &Point2<f64>,
    a1: &Point2<f64>,
    b0: &Point2<f64>,
    b1: &Point2<f64>,
    slack: f64,
    zero_tolerance: f64,
) -> Option<SegmentIntersection> {
    let a = *a1 - *a0;
    let b = *b1 - *b0;

    let denom = cross(&a, &b);
    if denom.abs() <= zero_tolerance {
        return None;
    }

    let d = *b0 - *a0;
    let t = cross(&d, &b) / denom;
    let u = cross(&d, &a) / denom;

    let lo = -slack;
    let hi = 1.0 + slack;
    if t < lo || t > hi || u < lo || u > hi {
        return None;
    }

    Some(SegmentIntersection {
        t,
        u,
        point: *a0 + a * t,
    })
}

/// Convenience wrapper returning only whether the segments cross.
#[inline]
pub fn segments_cross(
    a0: &Point2<f64>,
    a1: &Point2<f64>,
    b0: &Point2<f64>,
    b1: &Point2<f64>,
    slack: f64,
    zero_tolerance: f64,
) -> bool {
    intersect_segments(a0, a1, b0, b1, slack, zero_tolerance).is_some()
}
