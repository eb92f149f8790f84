// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View-local coordinate frame
//!
//! A drafting view can be rotated, cropped or cut at any orientation
//! through the model. All 2D reasoning (grouping, ordering, intersection)
//! happens in the view's own frame:
//!
//! - x: distance along the view's right direction
//! - y: distance along the view's up direction
//! - z: depth along the view normal (toward the viewer)

use datum_dims_core::{Error, Result};
use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

/// Vectors shorter than this are treated as zero length.
pub const ZERO_LENGTH: f64 = 1e-12;

/// Maximum |dot| between two basis vectors still accepted as orthogonal.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// Crop rectangle in view-local X/Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl CropBox {
    /// Creates a crop box; `min` must be strictly below `max` on both axes.
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Result<Self> {
        let finite = min.coords.iter().chain(max.coords.iter()).all(|v| v.is_finite());
        if !finite || min.x >= max.x || min.y >= max.y {
            return Err(Error::degenerate(format!(
                "crop box min ({}, {}) must be below max ({}, {})",
                min.x, min.y, max.x, max.y
            )));
        }
        Ok(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Conservative segment test: true when the segment's bounding box
    /// overlaps the crop box and the segment's supporting line passes
    /// through the box.
    pub fn overlaps_segment(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        if a.x.max(b.x) < self.min.x
            || a.x.min(b.x) > self.max.x
            || a.y.max(b.y) < self.min.y
            || a.y.min(b.y) > self.max.y
        {
            return false;
        }

        // The supporting line misses the box when all four corners sit on
        // the same side of it.
        let d = *b - *a;
        let side = |c: Point2<f64>| d.x * (c.y - a.y) - d.y * (c.x - a.x);
        let corners = [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ];
        let sides: Vec<f64> = corners.iter().map(|c| side(*c)).collect();
        let all_pos = sides.iter().all(|s| *s > 0.0);
        let all_neg = sides.iter().all(|s| *s < 0.0);
        !(all_pos || all_neg)
    }
}

/// Origin, orthonormal basis, optional crop and scale of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    origin: Point3<f64>,
    right: Vector3<f64>,
    up: Vector3<f64>,
    normal: Vector3<f64>,
    crop: Option<CropBox>,
    scale: f64,
}

impl ViewFrame {
    /// Creates a frame from an explicit basis.
    ///
    /// The three directions are normalized; a zero-length or non-orthogonal
    /// basis, or a non-positive scale, is rejected as degenerate.
    pub fn new(
        origin: Point3<f64>,
        right: Vector3<f64>,
        up: Vector3<f64>,
        normal: Vector3<f64>,
        scale: f64,
    ) -> Result<Self> {
        let right = unit(right, "right")?;
        let up = unit(up, "up")?;
        let normal = unit(normal, "normal")?;

        let pairs = [
            ("right", "up", right.dot(&up)),
            ("right", "normal", right.dot(&normal)),
            ("up", "normal", up.dot(&normal)),
        ];
        for (a, b, dot) in pairs {
            if dot.abs() > ORTHOGONALITY_TOLERANCE {
                return Err(Error::degenerate(format!(
                    "view {a} and {b} directions are not orthogonal (dot = {dot})"
                )));
            }
        }

        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::degenerate(format!("view scale must be positive, got {scale}")));
        }

        Ok(Self {
            origin,
            right,
            up,
            normal,
            crop: None,
            scale,
        })
    }

    /// Creates a frame from right and up; the normal is `right × up`.
    pub fn from_right_up(
        origin: Point3<f64>,
        right: Vector3<f64>,
        up: Vector3<f64>,
        scale: f64,
    ) -> Result<Self> {
        let normal = right.cross(&up);
        Self::new(origin, right, up, normal, scale)
    }

    /// An unrotated plan frame: right = +X, up = +Y, normal = +Z.
    pub fn plan(origin: Point3<f64>, scale: f64) -> Result<Self> {
        Self::new(origin, Vector3::x(), Vector3::y(), Vector3::z(), scale)
    }

    /// Attaches an active crop box.
    pub fn with_crop(mut self, crop: CropBox) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    pub fn right(&self) -> &Vector3<f64> {
        &self.right
    }

    pub fn up(&self) -> &Vector3<f64> {
        &self.up
    }

    pub fn normal(&self) -> &Vector3<f64> {
        &self.normal
    }

    pub fn crop(&self) -> Option<&CropBox> {
        self.crop.as_ref()
    }

    /// View scale N of a 1:N view.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Projects a model point onto the view basis: `(x, y, depth)`.
    #[inline]
    pub fn to_local(&self, p: &Point3<f64>) -> Point3<f64> {
        let d = *p - self.origin;
        Point3::new(d.dot(&self.right), d.dot(&self.up), d.dot(&self.normal))
    }

    /// Inverse of [`ViewFrame::to_local`].
    #[inline]
    pub fn to_model(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.right * local.x + self.up * local.y + self.normal * local.z
    }

    /// View-local X/Y of a model point, dropping depth.
    #[inline]
    pub fn to_local_2d(&self, p: &Point3<f64>) -> Point2<f64> {
        let d = *p - self.origin;
        Point2::new(d.dot(&self.right), d.dot(&self.up))
    }

    /// Model point at view-local `(x, y)` on the view plane.
    #[inline]
    pub fn to_model_2d(&self, local: &Point2<f64>) -> Point3<f64> {
        self.to_model(&Point3::new(local.x, local.y, 0.0))
    }

    /// Components of a model direction along right and up.
    #[inline]
    pub fn local_direction(&self, v: &Vector3<f64>) -> Vector2<f64> {
        Vector2::new(v.dot(&self.right), v.dot(&self.up))
    }

    /// Model direction of a view-local 2D direction.
    #[inline]
    pub fn model_direction(&self, d: &Vector2<f64>) -> Vector3<f64> {
        self.right * d.x + self.up * d.y
    }
}

fn unit(v: Vector3<f64>, name: &str) -> Result<Vector3<f64>> {
    Unit::try_new(v, ZERO_LENGTH)
        .map(Unit::into_inner)
        .ok_or_else(|| Error::degenerate(format!("view {name} direction has zero length")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn section_frame() -> ViewFrame {
        // Section looking north: right = +X, up = +Z, normal = -Y.
        ViewFrame::from_right_up(
            Point3::new(10.0, 5.0, 0.0),
            Vector3::x(),
            Vector3::z(),
            50.0,
        )
        .unwrap()
    }

    #[test]
    fn to_local_projects_onto_basis() {
        let frame = section_frame();
        let local = frame.to_local(&Point3::new(12.0, 8.0, 3.0));
        assert_relative_eq!(local.x, 2.0);
        assert_relative_eq!(local.y, 3.0);
        assert_relative_eq!(local.z, -3.0);
    }

    #[test]
    fn round_trip_rotated_frame() {
        let angle: f64 = 0.3;
        let frame = ViewFrame::from_right_up(
            Point3::new(-4.0, 7.5, 2.0),
            Vector3::new(angle.cos(), angle.sin(), 0.0),
            Vector3::new(-angle.sin(), angle.cos(), 0.0),
            100.0,
        )
        .unwrap();

        let p = Point3::new(123.25, -42.0, 9.75);
        let back = frame.to_model(&frame.to_local(&p));
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_basis_is_degenerate() {
        let err = ViewFrame::new(
            Point3::origin(),
            Vector3::zeros(),
            Vector3::y(),
            Vector3::z(),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::GeometryDegenerate(_)));
    }

    #[test]
    fn skewed_basis_is_rejected() {
        let err = ViewFrame::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::new(0.5, 1.0, 0.0),
            Vector3::z(),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::GeometryDegenerate(_)));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        assert!(ViewFrame::plan(Point3::origin(), 0.0).is_err());
        assert!(ViewFrame::plan(Point3::origin(), f64::NAN).is_err());
    }

    #[test]
    fn directions_map_both_ways() {
        let frame = section_frame();
        let local = frame.local_direction(&Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(local.x, 0.0);
        assert_relative_eq!(local.y, 2.0);

        let model = frame.model_direction(&Vector2::new(1.0, 1.0));
        assert_relative_eq!(model, Vector3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn crop_box_validation() {
        assert!(CropBox::new(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)).is_ok());
        assert!(CropBox::new(Point2::new(0.0, 5.0), Point2::new(10.0, 5.0)).is_err());
    }

    #[test]
    fn crop_box_segment_overlap() {
        let crop = CropBox::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)).unwrap();
        assert!(crop.overlaps_segment(&Point2::new(5.0, -5.0), &Point2::new(5.0, 15.0)));
        assert!(!crop.overlaps_segment(&Point2::new(20.0, -5.0), &Point2::new(20.0, 15.0)));
        // Bounding boxes overlap but the diagonal passes beside the corner.
        assert!(!crop.overlaps_segment(&Point2::new(9.0, 12.0), &Point2::new(12.0, 9.0)));
    }
}
