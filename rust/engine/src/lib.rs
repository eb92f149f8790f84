// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Datum-Dims Engine
//!
//! Builds grid and level dimension chains for a host view and hands them to
//! the host in one transaction.
//!
//! ## Operations
//!
//! - [`build_automatic_dimensions`]: every grid family and the levels of a
//!   cropped view, anchored outside the crop box
//! - [`build_dimension_along_line`]: the grids a picked line crosses, or the
//!   levels within its elevation range
//! - [`materialize`]: creates one host dimension per chain, all or nothing
//! - [`dimension_view`] / [`dimension_along_picked_line`]: the full commands
//!
//! The host is reached only through the traits in [`host`]. [`scene`] and
//! [`recording`] provide in-memory implementations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use datum_dims_engine::{dimension_view, RecordingDocument, Scene, ViewAccessor};
//! use datum_dims_core::{DimensionConfig, DimensionScope};
//!
//! let scene = Scene::from_json(&json)?;
//! let mut doc = RecordingDocument::new();
//! let report = dimension_view(
//!     Some(scene.view() as &dyn ViewAccessor),
//!     &scene,
//!     &mut doc,
//!     DimensionScope::Grids,
//!     &DimensionConfig::default(),
//! )?;
//! println!("{} chains", report.chains.len());
//! ```

pub mod along_line;
pub mod automatic;
pub mod chain;
pub mod command;
pub mod host;
pub mod materialize;
pub mod pick;
pub mod recording;
pub mod scene;
pub mod selector;

pub use along_line::{build_dimension_along_line, dimensions_along_line, AlongLineOptions};
pub use automatic::{automatic_dimensions, build_automatic_dimensions};
pub use chain::{BuildOutcome, ChainBuilder};
pub use command::{dimension_along_picked_line, dimension_view, DimensionReport};
pub use host::{DatumProvider, MutationBoundary, Picker, ViewAccessor};
pub use materialize::materialize;
pub use pick::{pick_line, PickLine};
pub use recording::{DimensionHandle, RecordedDimension, RecordingDocument, ScriptedPicker};
pub use scene::{Scene, SceneError, SceneSnapshot, SceneView};
