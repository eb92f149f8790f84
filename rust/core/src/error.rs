// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for datum dimensioning.
//!
//! Every geometric or classification failure is detected before the host
//! document is touched, so all of these except [`Error::Mutation`] mean
//! "nothing was changed".

use crate::view::{DimensionScope, ViewKind};

/// Result type alias for dimensioning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or materializing dimension chains.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No view was supplied to the operation.
    #[error("no active view")]
    NoActiveView,

    /// The view is a view template and cannot carry annotations.
    #[error("view is a template view")]
    TemplateView,

    /// Whole-view dimensioning needs a crop boundary to anchor offsets against.
    #[error("crop region is not active in this view")]
    CropNotActive,

    /// The requested scope does not apply to this kind of view.
    #[error("{scope} cannot be dimensioned in a {kind} view")]
    UnsupportedViewType {
        /// Kind of the view the operation ran against.
        kind: ViewKind,
        /// Scope that was requested.
        scope: DimensionScope,
    },

    /// Fewer than two datums qualified for a chain.
    #[error("not enough datums to dimension: found {found}, need at least 2")]
    InsufficientCandidates {
        /// Number of datums that survived selection.
        found: usize,
    },

    /// A direction or basis vector collapsed to zero length.
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),

    /// The user aborted an interactive pick.
    #[error("pick cancelled")]
    PickCancelled,

    /// The host rejected a dimension; the transaction was rolled back.
    #[error("dimension creation failed: {0}")]
    Mutation(String),
}

impl Error {
    /// Creates a degenerate-geometry error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::GeometryDegenerate(msg.into())
    }

    /// Returns true for the normal early exit of a cancelled pick.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::PickCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_not_a_failure() {
        assert!(Error::PickCancelled.is_cancellation());
        assert!(!Error::CropNotActive.is_cancellation());
    }

    #[test]
    fn messages_name_the_view_kind() {
        let err = Error::UnsupportedViewType {
            kind: ViewKind::FloorPlan,
            scope: DimensionScope::Levels,
        };
        assert_eq!(err.to_string(), "levels cannot be dimensioned in a floor plan view");
    }
}
