// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension chain construction
//!
//! Orders selected datums along their sweep axis and places the anchor
//! lines. Offsets are paper distances converted to host units and
//! multiplied by the view scale, so the printed gap is the same at any
//! scale.
//!
//! Whole-view anchors sit outside the crop box: above it for vertical
//! grids, right of it for horizontal grids and left of it for levels. The
//! overall chain is one more overall offset further out.

use datum_dims_core::{
    AnchorLine, ChainKind, DatumCategory, DatumId, DimensionChain, DimensionConfig, Error, Result,
};
use datum_dims_geometry::{
    CropBox, Orientation, ProjectedGrid, SkippedDatum, SweepAxis, ViewFrame,
};
use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::pick::PickLine;
use crate::selector::LevelCandidate;

/// Chains produced by one operation plus the datums left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    pub chains: Vec<DimensionChain>,
    pub skipped: Vec<SkippedDatum>,
}

/// Grids in ascending sweep order with their coordinates.
#[derive(Debug, Clone)]
pub struct OrderedGrids {
    pub sweep: SweepAxis,
    pub members: Vec<(DatumId, f64)>,
}

impl OrderedGrids {
    /// Sorts `members` by the sweep coordinate of their midpoints.
    pub fn new(
        frame: &ViewFrame,
        direction: &Vector2<f64>,
        members: &[ProjectedGrid],
        zero_length_tolerance: f64,
    ) -> Self {
        let sweep = SweepAxis::for_direction(frame, direction, zero_length_tolerance);
        let mut ordered: Vec<(DatumId, f64)> = members
            .iter()
            .map(|m| (m.id.clone(), sweep.coordinate(&m.midpoint)))
            .collect();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Self {
            sweep,
            members: ordered,
        }
    }

    fn span(&self) -> Option<(f64, f64)> {
        Some((self.members.first()?.1, self.members.last()?.1))
    }

    fn split(&self) -> (Vec<DatumId>, Vec<f64>) {
        self.members.iter().cloned().unzip()
    }
}

/// Builds chains for one view.
pub struct ChainBuilder<'a> {
    frame: &'a ViewFrame,
    config: &'a DimensionConfig,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(frame: &'a ViewFrame, config: &'a DimensionConfig) -> Self {
        Self { frame, config }
    }

    fn individual_gap(&self) -> f64 {
        self.config.individual_offset(self.frame.scale())
    }

    fn overall_gap(&self) -> f64 {
        self.config.overall_offset(self.frame.scale())
    }

    /// Individual and overall chains for a whole-view grid family.
    pub fn whole_view_grids(
        &self,
        crop: &CropBox,
        orientation: Orientation,
        members: &[ProjectedGrid],
    ) -> Result<Vec<DimensionChain>> {
        let direction = match orientation {
            Orientation::Vertical => Vector2::y(),
            Orientation::Horizontal => Vector2::x(),
        };
        let ordered = OrderedGrids::new(
            self.frame,
            &direction,
            members,
            self.config.zero_length_tolerance,
        );
        let (from, to) = ordered.span().ok_or(Error::InsufficientCandidates { found: 0 })?;

        let gap = self.individual_gap();
        let anchor = self.crop_anchor(crop, orientation, from, to, gap);
        let (references, positions) = ordered.split();
        let individual = individual_chain(DatumCategory::Grid, references, positions, anchor)?;

        let overall_anchor =
            self.crop_anchor(crop, orientation, from, to, gap + self.overall_gap());
        let overall = overall_chain(&individual, overall_anchor);
        Ok(vec![individual, overall])
    }

    /// Anchor parallel to the crop edge the family is measured along.
    fn crop_anchor(
        &self,
        crop: &CropBox,
        orientation: Orientation,
        from: f64,
        to: f64,
        gap: f64,
    ) -> AnchorLine {
        let (a, b) = match orientation {
            Orientation::Vertical => {
                let y = crop.max.y + gap;
                (Point2::new(from, y), Point2::new(to, y))
            }
            Orientation::Horizontal => {
                let x = crop.max.x + gap;
                (Point2::new(x, from), Point2::new(x, to))
            }
        };
        AnchorLine::new(self.frame.to_model_2d(&a), self.frame.to_model_2d(&b))
    }

    /// Individual and overall chains for the levels of a whole view.
    ///
    /// `levels` must already be sorted by elevation.
    pub fn whole_view_levels(
        &self,
        crop: &CropBox,
        levels: &[LevelCandidate],
    ) -> Result<Vec<DimensionChain>> {
        let gap = self.individual_gap();
        let anchor = self.level_anchor(crop.min.x - gap, levels)?;
        let (references, positions) = split_levels(levels);
        let individual = individual_chain(DatumCategory::Level, references, positions, anchor)?;

        let overall_anchor = self.level_anchor(crop.min.x - gap - self.overall_gap(), levels)?;
        let overall = overall_chain(&individual, overall_anchor);
        Ok(vec![individual, overall])
    }

    /// Vertical anchor at view-local `x`, spanning the level elevations.
    fn level_anchor(&self, x: f64, levels: &[LevelCandidate]) -> Result<AnchorLine> {
        let (low, high) = elevation_span(levels)?;
        let at = self.frame.to_model_2d(&Point2::new(x, 0.0));
        Ok(AnchorLine::new(
            Point3::new(at.x, at.y, low),
            Point3::new(at.x, at.y, high),
        ))
    }

    /// Chains for grids collected by a pick line.
    ///
    /// The anchor passes through the first pick point and runs along the
    /// sweep axis, padded past both end grids.
    pub fn along_line_grids(
        &self,
        pick: &PickLine,
        direction: &Vector2<f64>,
        members: &[ProjectedGrid],
        include_overall: bool,
    ) -> Result<Vec<DimensionChain>> {
        let ordered = OrderedGrids::new(
            self.frame,
            direction,
            members,
            self.config.zero_length_tolerance,
        );
        let (from, to) = ordered.span().ok_or(Error::InsufficientCandidates { found: 0 })?;

        let padding = self.config.line_padding;
        let anchor = AnchorLine::new(
            ordered.sweep.slide_to(&pick.start, from - padding),
            ordered.sweep.slide_to(&pick.start, to + padding),
        );
        let (references, positions) = ordered.split();
        let individual = individual_chain(DatumCategory::Grid, references, positions, anchor)?;

        let mut chains = vec![individual];
        if include_overall {
            let along_grids = self.frame.model_direction(direction);
            let shift = along_grids * self.overall_gap();
            let overall = overall_chain(&chains[0], chains[0].anchor.translated(shift));
            chains.push(overall);
        }
        Ok(chains)
    }

    /// Chains for levels inside a picked elevation range.
    ///
    /// The anchor is vertical at the first pick point's X/Y.
    pub fn along_line_levels(
        &self,
        pick: &PickLine,
        levels: &[LevelCandidate],
        include_overall: bool,
    ) -> Result<Vec<DimensionChain>> {
        let (low, high) = elevation_span(levels)?;
        let anchor = AnchorLine::new(
            Point3::new(pick.start.x, pick.start.y, low),
            Point3::new(pick.start.x, pick.start.y, high),
        );
        let (references, positions) = split_levels(levels);
        let individual = individual_chain(DatumCategory::Level, references, positions, anchor)?;

        let mut chains = vec![individual];
        if include_overall {
            let shift: Vector3<f64> = -*self.frame.right() * self.overall_gap();
            let overall = overall_chain(&chains[0], chains[0].anchor.translated(shift));
            chains.push(overall);
        }
        Ok(chains)
    }
}

fn split_levels(levels: &[LevelCandidate]) -> (Vec<DatumId>, Vec<f64>) {
    levels.iter().map(|l| (l.id.clone(), l.elevation)).unzip()
}

fn elevation_span(levels: &[LevelCandidate]) -> Result<(f64, f64)> {
    match (levels.first(), levels.last()) {
        (Some(low), Some(high)) => Ok((low.elevation, high.elevation)),
        _ => Err(Error::InsufficientCandidates { found: 0 }),
    }
}

/// Chain through every member; needs at least two.
pub fn individual_chain(
    category: DatumCategory,
    references: Vec<DatumId>,
    positions: Vec<f64>,
    anchor: AnchorLine,
) -> Result<DimensionChain> {
    if references.len() < 2 {
        return Err(Error::InsufficientCandidates {
            found: references.len(),
        });
    }
    Ok(DimensionChain {
        kind: ChainKind::Individual,
        category,
        references,
        anchor,
        positions,
    })
}

/// Chain through the first and last member of `individual`.
pub fn overall_chain(individual: &DimensionChain, anchor: AnchorLine) -> DimensionChain {
    DimensionChain {
        kind: ChainKind::Overall,
        category: individual.category,
        references: ends(&individual.references),
        anchor,
        positions: ends(&individual.positions),
    }
}

fn ends<T: Clone>(items: &[T]) -> Vec<T> {
    items.first().into_iter().chain(items.last()).cloned().collect()
}
