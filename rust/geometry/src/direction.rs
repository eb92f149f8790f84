// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Direction classification of grids in view-local 2D.
//!
//! Two strategies are provided:
//!
//! - [`classify_whole_view`] sorts grids into a vertical and a horizontal
//!   family using a dot-product tolerance; diagonal grids are skipped.
//! - [`classify_by_signature`] buckets grids by a rounded, sign-canonical
//!   direction signature so exactly parallel grids share a bucket despite
//!   floating noise; buckets with a single member are dropped.
//!
//! Both keep buckets in first-seen order so downstream selection never
//! depends on hash iteration order.

use datum_dims_core::{Datum, DatumId};
use nalgebra::{Point2, Point3, Vector2};
use rustc_hash::FxHashMap;

use crate::view_frame::ViewFrame;

/// A grid re-expressed in a view's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGrid {
    pub id: DatumId,
    /// Curve endpoints in view-local X/Y.
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    /// Curve midpoint in model space.
    pub midpoint: Point3<f64>,
    /// Normalized view-local direction.
    pub direction: Vector2<f64>,
}

/// Why a datum was left out of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The datum is a level, not a grid.
    NotAGrid,
    /// The datum is a grid, not a level.
    NotALevel,
    /// Endpoints coincide; there is no direction.
    ZeroLengthDirection,
    /// The grid runs along the view normal and shows up as a point.
    ParallelToViewNormal,
    /// Neither vertical nor horizontal in the view.
    Diagonal,
    /// No other grid shares this direction.
    NoParallelPartner,
    /// The pick line does not cross the grid.
    NotCrossed,
    /// The level lies outside the picked elevation range.
    OutsideElevationRange,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAGrid => "not a grid",
            SkipReason::NotALevel => "not a level",
            SkipReason::ZeroLengthDirection => "zero-length direction",
            SkipReason::ParallelToViewNormal => "parallel to view normal",
            SkipReason::Diagonal => "diagonal in view",
            SkipReason::NoParallelPartner => "no parallel grid",
            SkipReason::NotCrossed => "not crossed by pick line",
            SkipReason::OutsideElevationRange => "outside picked elevation range",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A datum left out of classification, reported rather than fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDatum {
    pub id: DatumId,
    pub reason: SkipReason,
}

/// Which whole-view family a group is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Runs along the view's up direction; measured left to right.
    Vertical,
    /// Runs along the view's right direction; measured bottom to top.
    Horizontal,
}

/// Grids sharing a direction within tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionGroup {
    /// Representative normalized view-local direction.
    pub direction: Vector2<f64>,
    /// Set in whole-view mode.
    pub orientation: Option<Orientation>,
    pub members: Vec<ProjectedGrid>,
}

impl DirectionGroup {
    fn new(direction: Vector2<f64>, orientation: Option<Orientation>) -> Self {
        Self {
            direction,
            orientation,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lexicographically smallest member identifier.
    pub fn min_id(&self) -> Option<&DatumId> {
        self.members.iter().map(|m| &m.id).min()
    }
}

/// Groups plus everything that was skipped along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub groups: Vec<DirectionGroup>,
    pub skipped: Vec<SkippedDatum>,
}

impl Classification {
    /// Groups with at least two members.
    pub fn qualifying(&self) -> impl Iterator<Item = &DirectionGroup> {
        self.groups.iter().filter(|g| g.len() >= 2)
    }

    pub fn has_qualifying(&self) -> bool {
        self.qualifying().next().is_some()
    }
}

/// Projects grid datums into the view frame.
///
/// Levels, zero-length grids and grids seen end-on are returned as skipped.
pub fn project_grids(
    frame: &ViewFrame,
    datums: &[Datum],
    zero_length_tolerance: f64,
) -> (Vec<ProjectedGrid>, Vec<SkippedDatum>) {
    let mut grids = Vec::with_capacity(datums.len());
    let mut skipped = Vec::new();

    for datum in datums {
        let Some(curve) = datum.curve() else {
            skipped.push(SkippedDatum {
                id: datum.id.clone(),
                reason: SkipReason::NotAGrid,
            });
            continue;
        };

        let model_dir = curve.direction();
        let model_len = model_dir.norm();
        if model_len <= zero_length_tolerance || curve.length() <= zero_length_tolerance {
            skipped.push(SkippedDatum {
                id: datum.id.clone(),
                reason: SkipReason::ZeroLengthDirection,
            });
            continue;
        }

        let local = frame.local_direction(&(model_dir / model_len));
        let local_len = local.norm();
        if local_len <= zero_length_tolerance {
            skipped.push(SkippedDatum {
                id: datum.id.clone(),
                reason: SkipReason::ParallelToViewNormal,
            });
            continue;
        }

        let (start, end) = curve.endpoints();
        grids.push(ProjectedGrid {
            id: datum.id.clone(),
            start: frame.to_local_2d(&start),
            end: frame.to_local_2d(&end),
            midpoint: curve.midpoint(),
            direction: local / local_len,
        });
    }

    (grids, skipped)
}

/// Splits grids into a vertical and a horizontal family.
///
/// A grid is vertical when `|dir.y| > 1 - tolerance` and horizontal when
/// `|dir.x| > 1 - tolerance`. The vertical group (if any) comes first.
pub fn classify_whole_view(grids: Vec<ProjectedGrid>, angular_tolerance: f64) -> Classification {
    let threshold = 1.0 - angular_tolerance;
    let mut vertical = DirectionGroup::new(Vector2::y(), Some(Orientation::Vertical));
    let mut horizontal = DirectionGroup::new(Vector2::x(), Some(Orientation::Horizontal));
    let mut skipped = Vec::new();

    for grid in grids {
        if grid.direction.y.abs() > threshold {
            vertical.members.push(grid);
        } else if grid.direction.x.abs() > threshold {
            horizontal.members.push(grid);
        } else {
            skipped.push(SkippedDatum {
                id: grid.id,
                reason: SkipReason::Diagonal,
            });
        }
    }

    let groups = [vertical, horizontal]
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect();

    Classification { groups, skipped }
}

/// Rounded, sign-canonical direction key.
///
/// Anti-parallel directions map to the same key: the sign is chosen so the
/// rounded x is positive, or x is zero and y is positive.
pub fn direction_signature(direction: &Vector2<f64>, precision: u32) -> (i64, i64) {
    canonical_direction(direction, precision).0
}

/// Signature plus the direction flipped to match the signature's sign.
fn canonical_direction(direction: &Vector2<f64>, precision: u32) -> ((i64, i64), Vector2<f64>) {
    let factor = 10f64.powi(precision as i32);
    let kx = (direction.x * factor).round() as i64;
    let ky = (direction.y * factor).round() as i64;
    if kx < 0 || (kx == 0 && ky < 0) {
        ((-kx, -ky), -direction)
    } else {
        ((kx, ky), *direction)
    }
}

/// Buckets grids by rounded direction signature.
///
/// The first member of each bucket provides the (sign-canonical)
/// representative direction. Buckets with fewer than two members are
/// discarded and their grid reported as [`SkipReason::NoParallelPartner`].
pub fn classify_by_signature(grids: Vec<ProjectedGrid>, precision: u32) -> Classification {
    let mut index: FxHashMap<(i64, i64), usize> = FxHashMap::default();
    let mut groups: Vec<DirectionGroup> = Vec::new();

    for grid in grids {
        let (key, representative) = canonical_direction(&grid.direction, precision);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(DirectionGroup::new(representative, None));
            groups.len() - 1
        });
        groups[slot].members.push(grid);
    }

    let mut skipped = Vec::new();
    groups.retain_mut(|group| {
        if group.len() >= 2 {
            return true;
        }
        skipped.extend(group.members.drain(..).map(|m| SkippedDatum {
            id: m.id,
            reason: SkipReason::NoParallelPartner,
        }));
        false
    });

    Classification { groups, skipped }
}
