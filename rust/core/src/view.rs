// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View kinds and the dimensioning scopes valid for each.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of drafting view, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewKind {
    FloorPlan,
    CeilingPlan,
    StructuralPlan,
    Section,
    Elevation,
    Detail,
    ThreeD,
    Drafting,
    Sheet,
}

impl ViewKind {
    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::FloorPlan => "floor plan",
            ViewKind::CeilingPlan => "ceiling plan",
            ViewKind::StructuralPlan => "structural plan",
            ViewKind::Section => "section",
            ViewKind::Elevation => "elevation",
            ViewKind::Detail => "detail",
            ViewKind::ThreeD => "3D",
            ViewKind::Drafting => "drafting",
            ViewKind::Sheet => "sheet",
        }
    }

    /// Grids show up as lines in plans, sections, elevations and details.
    pub fn supports_grids(&self) -> bool {
        matches!(
            self,
            ViewKind::FloorPlan
                | ViewKind::CeilingPlan
                | ViewKind::StructuralPlan
                | ViewKind::Section
                | ViewKind::Elevation
                | ViewKind::Detail
        )
    }

    /// Levels only show up edge-on, i.e. in vertical cuts.
    pub fn supports_levels(&self) -> bool {
        matches!(
            self,
            ViewKind::Section | ViewKind::Elevation | ViewKind::Detail
        )
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which datums the automatic operation should dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DimensionScope {
    Grids,
    Levels,
    #[default]
    Both,
}

impl DimensionScope {
    pub fn includes_grids(&self) -> bool {
        matches!(self, DimensionScope::Grids | DimensionScope::Both)
    }

    pub fn includes_levels(&self) -> bool {
        matches!(self, DimensionScope::Levels | DimensionScope::Both)
    }

    /// Narrows the scope to what `kind` can show.
    ///
    /// `Both` silently drops the half the view cannot display; an explicit
    /// single scope the view cannot display is an error, as is `Both` on a
    /// view that shows neither.
    pub fn resolve_for(self, kind: ViewKind) -> crate::Result<DimensionScope> {
        let grids = self.includes_grids() && kind.supports_grids();
        let levels = self.includes_levels() && kind.supports_levels();
        match (self, grids, levels) {
            (DimensionScope::Both, true, true) => Ok(DimensionScope::Both),
            (DimensionScope::Both, true, false) | (DimensionScope::Grids, true, _) => {
                Ok(DimensionScope::Grids)
            }
            (DimensionScope::Both, false, true) | (DimensionScope::Levels, _, true) => {
                Ok(DimensionScope::Levels)
            }
            _ => Err(crate::Error::UnsupportedViewType { kind, scope: self }),
        }
    }
}

impl std::fmt::Display for DimensionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DimensionScope::Grids => "grids",
            DimensionScope::Levels => "levels",
            DimensionScope::Both => "grids and levels",
        })
    }
}

/// Which datum family a picked-line operation collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DatumTarget {
    Grids,
    Levels,
}

impl DatumTarget {
    /// The equivalent automatic scope, used for view-kind validation.
    pub fn scope(&self) -> DimensionScope {
        match self {
            DatumTarget::Grids => DimensionScope::Grids,
            DatumTarget::Levels => DimensionScope::Levels,
        }
    }
}
