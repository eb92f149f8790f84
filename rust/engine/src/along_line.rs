// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimensioning along a picked line.

use datum_dims_core::{DatumTarget, DimensionChain, DimensionConfig, Error, Result};
use tracing::{info, warn};

use crate::chain::{BuildOutcome, ChainBuilder};
use crate::host::{DatumProvider, ViewAccessor};
use crate::pick::PickLine;
use crate::selector::{select_grids_along_line, select_levels_along_line};

/// Options for [`build_dimension_along_line`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlongLineOptions {
    /// Also emit an overall chain spanning the first and last member.
    pub include_overall: bool,
}

/// Dimensions the grids crossed by, or the levels spanned by, a pick line.
///
/// No crop box is required.
pub fn build_dimension_along_line(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    pick: &PickLine,
    target: DatumTarget,
    options: &AlongLineOptions,
    config: &DimensionConfig,
) -> Result<Vec<DimensionChain>> {
    dimensions_along_line(view, datums, pick, target, options, config).map(|o| o.chains)
}

/// Like [`build_dimension_along_line`], also returning skipped datums.
pub fn dimensions_along_line(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    pick: &PickLine,
    target: DatumTarget,
    options: &AlongLineOptions,
    config: &DimensionConfig,
) -> Result<BuildOutcome> {
    config.validate()?;
    let view = view.ok_or(Error::NoActiveView)?;
    if view.is_template() {
        return Err(Error::TemplateView);
    }
    target.scope().resolve_for(view.view_kind())?;
    let frame = view.view_frame()?;
    let builder = ChainBuilder::new(&frame, config);

    let outcome = match target {
        DatumTarget::Grids => {
            let grids = datums.grids_visible_in(view);
            let selection = select_grids_along_line(&frame, &grids, pick, config)?;
            BuildOutcome {
                chains: builder.along_line_grids(
                    pick,
                    &selection.direction,
                    &selection.members,
                    options.include_overall,
                )?,
                skipped: selection.skipped,
            }
        }
        DatumTarget::Levels => {
            let levels = datums.levels_visible_in(view);
            let selection = select_levels_along_line(&levels, pick, config);
            if selection.levels.len() < 2 {
                return Err(Error::InsufficientCandidates {
                    found: selection.levels.len(),
                });
            }
            BuildOutcome {
                chains: builder.along_line_levels(
                    pick,
                    &selection.levels,
                    options.include_overall,
                )?,
                skipped: selection.skipped,
            }
        }
    };

    for skipped in &outcome.skipped {
        warn!(id = %skipped.id, reason = %skipped.reason, "Skipped datum");
    }
    info!(
        view = view.view_id(),
        ?target,
        chains = outcome.chains.len(),
        "Built dimensions along picked line"
    );
    Ok(outcome)
}
