// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host collaborator interfaces.
//!
//! The engine never owns views, datums or dimensions. It reads them through
//! [`ViewAccessor`] and [`DatumProvider`], asks the user for points through
//! [`Picker`], and writes through a [`MutationBoundary`].

use datum_dims_core::{AnchorLine, Datum, DatumId, Result, ViewKind};
use datum_dims_geometry::{CropBox, ViewFrame};
use nalgebra::Point3;

/// Read access to the active view.
pub trait ViewAccessor {
    fn view_id(&self) -> &str;

    fn view_kind(&self) -> ViewKind;

    /// Templates carry settings only and cannot hold annotations.
    fn is_template(&self) -> bool;

    /// Origin, basis and scale. The crop box is attached when active.
    fn view_frame(&self) -> Result<ViewFrame>;

    fn is_crop_active(&self) -> bool;

    /// Crop rectangle in view-local X/Y, if the view has one.
    fn crop_extents(&self) -> Option<CropBox>;
}

/// Datums the host shows in a view.
pub trait DatumProvider {
    fn grids_visible_in(&self, view: &dyn ViewAccessor) -> Vec<Datum>;

    fn levels_visible_in(&self, view: &dyn ViewAccessor) -> Vec<Datum>;
}

/// Interactive point picking.
pub trait Picker {
    /// Returns `None` when the user cancels.
    fn pick_point(&mut self, prompt: &str) -> Option<Point3<f64>>;
}

/// Transactional write access to the host document.
pub trait MutationBoundary {
    /// Host handle of a created dimension.
    type Handle;

    fn begin_transaction(&mut self, name: &str) -> Result<()>;

    fn create_dimension(
        &mut self,
        view: &dyn ViewAccessor,
        anchor: &AnchorLine,
        references: &[DatumId],
    ) -> Result<Self::Handle>;

    fn commit(&mut self) -> Result<()>;

    /// Discards everything created since `begin_transaction`.
    fn rollback(&mut self);
}
