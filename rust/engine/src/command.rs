// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing commands: build, then materialize in one transaction.

use datum_dims_core::{DatumTarget, DimensionChain, DimensionConfig, DimensionScope, Error, Result};
use datum_dims_geometry::SkippedDatum;
use tracing::info;

use crate::along_line::{dimensions_along_line, AlongLineOptions};
use crate::automatic::automatic_dimensions;
use crate::host::{DatumProvider, MutationBoundary, Picker, ViewAccessor};
use crate::materialize::{materialize, ALONG_LINE_TRANSACTION, AUTOMATIC_TRANSACTION};
use crate::pick::pick_line;

/// What a command built and created.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionReport<H> {
    pub chains: Vec<DimensionChain>,
    /// Host handles, one per chain, same order.
    pub handles: Vec<H>,
    pub skipped: Vec<SkippedDatum>,
}

/// Dimensions the whole active view.
pub fn dimension_view<B: MutationBoundary + ?Sized>(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    boundary: &mut B,
    scope: DimensionScope,
    config: &DimensionConfig,
) -> Result<DimensionReport<B::Handle>> {
    let outcome = automatic_dimensions(view, datums, scope, config)?;
    let view = view.ok_or(Error::NoActiveView)?;
    let handles = materialize(boundary, view, &outcome.chains, AUTOMATIC_TRANSACTION)?;
    Ok(DimensionReport {
        chains: outcome.chains,
        handles,
        skipped: outcome.skipped,
    })
}

/// Asks for a line, then dimensions the datums it collects.
///
/// Cancelling a pick returns [`Error::PickCancelled`] before anything is
/// built or created.
pub fn dimension_along_picked_line<B: MutationBoundary + ?Sized>(
    view: Option<&dyn ViewAccessor>,
    datums: &dyn DatumProvider,
    picker: &mut dyn Picker,
    boundary: &mut B,
    target: DatumTarget,
    options: &AlongLineOptions,
    config: &DimensionConfig,
) -> Result<DimensionReport<B::Handle>> {
    let view = view.ok_or(Error::NoActiveView)?;
    if view.is_template() {
        return Err(Error::TemplateView);
    }

    let pick = match pick_line(picker) {
        Err(err) if err.is_cancellation() => {
            info!(view = view.view_id(), "Dimension line pick cancelled");
            return Err(err);
        }
        other => other?,
    };

    let outcome = dimensions_along_line(Some(view), datums, &pick, target, options, config)?;
    let handles = materialize(boundary, view, &outcome.chains, ALONG_LINE_TRANSACTION)?;
    Ok(DimensionReport {
        chains: outcome.chains,
        handles,
        skipped: outcome.skipped,
    })
}
