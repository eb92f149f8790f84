// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-view dimensioning.

use datum_dims_core::{DimensionChain, DimensionConfig, DimensionScope, Error, Result};
use tracing::{debug, info, warn};

use crate::chain::{BuildOutcome, ChainBuilder};
use crate::host::{DatumProvider, ViewAccessor};
use crate::selector::{collect_levels, select_whole_view_grids};

/// Dimensions every grid family and/or the levels of a cropped view.
///
/// Each grid family (vertical, horizontal) and the level set produce an
/// individual and an overall chain when they have at least two members.
pub fn build_automatic_dimensions(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    scope: DimensionScope,
    config: &DimensionConfig,
) -> Result<Vec<DimensionChain>> {
    automatic_dimensions(view, datums, scope, config).map(|outcome| outcome.chains)
}

/// Like [`build_automatic_dimensions`], also returning skipped datums.
pub fn automatic_dimensions(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    scope: DimensionScope,
    config: &DimensionConfig,
) -> Result<BuildOutcome> {
    config.validate()?;
    let view = view.ok_or(Error::NoActiveView)?;
    if view.is_template() {
        return Err(Error::TemplateView);
    }
    let scope = scope.resolve_for(view.view_kind())?;
    if !view.is_crop_active() {
        return Err(Error::CropNotActive);
    }
    let crop = view.crop_extents().ok_or(Error::CropNotActive)?;
    let frame = view.view_frame()?;
    let builder = ChainBuilder::new(&frame, config);

    let mut outcome = BuildOutcome::default();
    let mut largest_family = 0;

    if scope.includes_grids() {
        let grids = datums.grids_visible_in(view);
        debug!(view = view.view_id(), count = grids.len(), "Collected visible grids");

        let classification = select_whole_view_grids(&frame, &grids, config);
        for group in &classification.groups {
            largest_family = largest_family.max(group.len());
            let Some(orientation) = group.orientation else {
                continue;
            };
            if group.len() < 2 {
                debug!(?orientation, "Grid family has a single member");
                continue;
            }
            outcome
                .chains
                .extend(builder.whole_view_grids(&crop, orientation, &group.members)?);
        }
        outcome.skipped.extend(classification.skipped);
    }

    if scope.includes_levels() {
        let levels = datums.levels_visible_in(view);
        let selection = collect_levels(&levels);
        debug!(view = view.view_id(), count = selection.levels.len(), "Collected visible levels");

        largest_family = largest_family.max(selection.levels.len());
        if selection.levels.len() >= 2 {
            outcome
                .chains
                .extend(builder.whole_view_levels(&crop, &selection.levels)?);
        }
        outcome.skipped.extend(selection.skipped);
    }

    for skipped in &outcome.skipped {
        warn!(id = %skipped.id, reason = %skipped.reason, "Skipped datum");
    }

    if outcome.chains.is_empty() {
        return Err(Error::InsufficientCandidates {
            found: largest_family,
        });
    }

    info!(
        view = view.view_id(),
        %scope,
        chains = outcome.chains.len(),
        "Built automatic dimensions"
    );
    Ok(outcome)
}
