// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Datum-Dims Core
//!
//! Shared vocabulary for automatic datum dimensioning: grids and levels,
//! the dimension chains produced from them, view kinds and scopes, host
//! length units, tunable tolerances, and the error taxonomy every other
//! crate reports through.
//!
//! ## Overview
//!
//! - **Datums**: [`Datum`] is a grid ([`GridCurve`]) or a level (an elevation)
//! - **Chains**: [`DimensionChain`] is an ordered list of [`DatumId`]s plus the
//!   [`AnchorLine`] the measurement string is drawn on
//! - **Scopes**: [`DimensionScope`] and [`DatumTarget`] validated against [`ViewKind`]
//! - **Units & tolerances**: [`LengthUnit`] and [`DimensionConfig`]
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on the
//! plain enums, identifiers and [`DimensionConfig`].

pub mod config;
pub mod error;
pub mod model;
pub mod units;
pub mod view;

pub use config::DimensionConfig;
pub use error::{Error, Result};
pub use model::{
    AnchorLine, ChainKind, Datum, DatumCategory, DatumGeometry, DatumId, DimensionChain,
    GridCurve,
};
pub use units::LengthUnit;
pub use view::{DatumTarget, DimensionScope, ViewKind};
