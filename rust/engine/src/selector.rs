// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candidate selection
//!
//! Narrows the datums a host reports for a view down to the ones a chain
//! will reference:
//!
//! - whole view: every grid, split into vertical and horizontal families,
//!   and every level, sorted by elevation
//! - picked line: the direction group most nearly perpendicular to the pick
//!   line, filtered to the grids the line actually crosses

use std::cmp::Ordering;

use datum_dims_core::{Datum, DatumId, DimensionConfig, Error, Result};
use datum_dims_geometry::{
    classify_by_signature, classify_whole_view, intersect_segments, project_grids,
    Classification, DirectionGroup, ProjectedGrid, SkipReason, SkippedDatum, ViewFrame,
};
use nalgebra::Vector2;
use tracing::debug;

use crate::pick::PickLine;

/// Scores closer than this are treated as a tie.
pub const SCORE_TIE_TOLERANCE: f64 = 1e-9;

/// A level with its elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCandidate {
    pub id: DatumId,
    pub elevation: f64,
}

/// Levels sorted ascending by elevation (identifier breaks ties).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSelection {
    pub levels: Vec<LevelCandidate>,
    pub skipped: Vec<SkippedDatum>,
}

/// Grids chosen along a picked line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSelection {
    /// View-local direction of the chosen group.
    pub direction: Vector2<f64>,
    /// `|pick · direction|` of the chosen group.
    pub score: f64,
    pub members: Vec<ProjectedGrid>,
    pub skipped: Vec<SkippedDatum>,
}

/// Vertical and horizontal grid families of a whole view.
pub fn select_whole_view_grids(
    frame: &ViewFrame,
    grids: &[Datum],
    config: &DimensionConfig,
) -> Classification {
    let (projected, mut skipped) = project_grids(frame, grids, config.zero_length_tolerance);
    let mut classification = classify_whole_view(projected, config.angular_tolerance);
    skipped.append(&mut classification.skipped);
    classification.skipped = skipped;

    debug!(
        groups = classification.groups.len(),
        skipped = classification.skipped.len(),
        "Classified whole-view grids"
    );
    classification
}

/// Collects levels and sorts them by elevation.
pub fn collect_levels(datums: &[Datum]) -> LevelSelection {
    let mut selection = LevelSelection::default();
    for datum in datums {
        match datum.elevation() {
            Some(elevation) => selection.levels.push(LevelCandidate {
                id: datum.id.clone(),
                elevation,
            }),
            None => selection.skipped.push(SkippedDatum {
                id: datum.id.clone(),
                reason: SkipReason::NotALevel,
            }),
        }
    }
    selection.levels.sort_by(compare_levels);
    selection
}

fn compare_levels(a: &LevelCandidate, b: &LevelCandidate) -> Ordering {
    a.elevation
        .total_cmp(&b.elevation)
        .then_with(|| a.id.cmp(&b.id))
}

/// Levels whose elevation lies within the pick's Z range (plus epsilon).
pub fn select_levels_along_line(
    datums: &[Datum],
    pick: &PickLine,
    config: &DimensionConfig,
) -> LevelSelection {
    let (low, high) = pick.z_range();
    let low = low - config.elevation_epsilon;
    let high = high + config.elevation_epsilon;

    let mut selection = collect_levels(datums);
    let (inside, outside): (Vec<_>, Vec<_>) = selection
        .levels
        .into_iter()
        .partition(|l| l.elevation >= low && l.elevation <= high);
    selection.levels = inside;
    selection
        .skipped
        .extend(outside.into_iter().map(|l| SkippedDatum {
            id: l.id,
            reason: SkipReason::OutsideElevationRange,
        }));

    debug!(
        included = selection.levels.len(),
        low, high, "Filtered levels by picked elevation range"
    );
    selection
}

/// Picks the grid group the line is meant to collect and the members it crosses.
///
/// Fails with [`Error::InsufficientCandidates`] when no group has two
/// members or fewer than two members survive the crossing test, and with
/// [`Error::GeometryDegenerate`] when the pick line has no extent in the
/// view plane.
pub fn select_grids_along_line(
    frame: &ViewFrame,
    grids: &[Datum],
    pick: &PickLine,
    config: &DimensionConfig,
) -> Result<LineSelection> {
    let (projected, mut skipped) = project_grids(frame, grids, config.zero_length_tolerance);
    let projected_count = projected.len();
    let classification = classify_by_signature(projected, config.direction_precision);
    skipped.extend(classification.skipped);
    let groups = classification.groups;

    if groups.is_empty() {
        return Err(Error::InsufficientCandidates {
            found: projected_count.min(1),
        });
    }

    let (a0, a1) = pick.local_segment(frame);
    let along = a1 - a0;
    let length = along.norm();
    if length <= config.zero_length_tolerance {
        return Err(Error::degenerate(
            "pick line has no extent in the view plane",
        ));
    }
    let selection_dir = along / length;

    let (score, group) = most_perpendicular(&groups, &selection_dir)
        .ok_or(Error::InsufficientCandidates { found: 0 })?;
    debug!(
        groups = groups.len(),
        score,
        members = group.len(),
        "Selected direction group"
    );

    let mut members = Vec::with_capacity(group.len());
    if score > 1.0 - config.angular_tolerance {
        // A pick line parallel to the group cannot cross any member.
        members.extend(group.members.iter().cloned());
    } else {
        for member in &group.members {
            let crosses = intersect_segments(
                &a0,
                &a1,
                &member.start,
                &member.end,
                config.intersection_slack,
                config.zero_length_tolerance,
            )
            .is_some();
            if crosses {
                members.push(member.clone());
            } else {
                skipped.push(SkippedDatum {
                    id: member.id.clone(),
                    reason: SkipReason::NotCrossed,
                });
            }
        }
    }

    if members.len() < 2 {
        return Err(Error::InsufficientCandidates {
            found: members.len(),
        });
    }

    Ok(LineSelection {
        direction: group.direction,
        score,
        members,
        skipped,
    })
}

/// Group with the smallest `|selection · direction|`.
///
/// Ties go to the larger group, then to the group holding the
/// lexicographically smallest identifier.
pub fn most_perpendicular<'a>(
    groups: &'a [DirectionGroup],
    selection_dir: &Vector2<f64>,
) -> Option<(f64, &'a DirectionGroup)> {
    groups
        .iter()
        .map(|g| (selection_dir.dot(&g.direction).abs(), g))
        .reduce(|best, candidate| {
            if prefer(&candidate, &best) {
                candidate
            } else {
                best
            }
        })
}

fn prefer(candidate: &(f64, &DirectionGroup), best: &(f64, &DirectionGroup)) -> bool {
    let (score, group) = candidate;
    let (best_score, best_group) = best;
    if (score - best_score).abs() > SCORE_TIE_TOLERANCE {
        return score < best_score;
    }
    if group.len() != best_group.len() {
        return group.len() > best_group.len();
    }
    group.min_id() < best_group.min_id()
}
