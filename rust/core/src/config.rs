// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerances and offsets used by the dimensioning engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::LengthUnit;

/// Tolerances, paper offsets and host unit for one dimensioning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DimensionConfig {
    /// Slack in dot-product units when deciding a direction is vertical or horizontal.
    pub angular_tolerance: f64,
    /// Decimal places kept in the rounded direction signature (picked-line mode).
    pub direction_precision: u32,
    /// Parametric slack on both segments in the pick-line intersection test.
    pub intersection_slack: f64,
    /// Below this, a direction or cross-product denominator counts as zero.
    pub zero_length_tolerance: f64,
    /// Paper gap between the crop boundary and the individual chain (mm).
    pub individual_offset_mm: f64,
    /// Additional paper gap between the individual and overall chains (mm).
    pub overall_offset_mm: f64,
    /// Extension of a picked-line anchor past its end datums (internal units).
    pub line_padding: f64,
    /// Roundoff allowance on the picked elevation range (internal units).
    pub elevation_epsilon: f64,
    /// Internal length unit of the host model.
    pub length_unit: LengthUnit,
}

impl DimensionConfig {
    pub const DEFAULT_ANGULAR_TOLERANCE: f64 = 0.001;
    pub const DEFAULT_DIRECTION_PRECISION: u32 = 3;
    pub const DEFAULT_INTERSECTION_SLACK: f64 = 0.05;
    pub const DEFAULT_ZERO_LENGTH_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_INDIVIDUAL_OFFSET_MM: f64 = 8.0;
    pub const DEFAULT_OVERALL_OFFSET_MM: f64 = 6.0;
    pub const DEFAULT_LINE_PADDING: f64 = 1.0;
    pub const DEFAULT_ELEVATION_EPSILON: f64 = 1e-6;

    /// Checks that every tolerance is finite and in range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("angular_tolerance", self.angular_tolerance),
            ("zero_length_tolerance", self.zero_length_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::degenerate(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("intersection_slack", self.intersection_slack),
            ("individual_offset_mm", self.individual_offset_mm),
            ("overall_offset_mm", self.overall_offset_mm),
            ("line_padding", self.line_padding),
            ("elevation_epsilon", self.elevation_epsilon),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::degenerate(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.angular_tolerance >= 1.0 {
            return Err(Error::degenerate("angular_tolerance must be below 1"));
        }
        if self.direction_precision > 12 {
            return Err(Error::degenerate("direction_precision must be at most 12"));
        }
        Ok(())
    }

    /// Individual-chain gap in host units for a view at `scale` (1:N).
    #[inline]
    pub fn individual_offset(&self, scale: f64) -> f64 {
        self.length_unit.from_millimeters(self.individual_offset_mm) * scale
    }

    /// Overall-chain gap beyond the individual chain, in host units.
    #[inline]
    pub fn overall_offset(&self, scale: f64) -> f64 {
        self.length_unit.from_millimeters(self.overall_offset_mm) * scale
    }
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            angular_tolerance: Self::DEFAULT_ANGULAR_TOLERANCE,
            direction_precision: Self::DEFAULT_DIRECTION_PRECISION,
            intersection_slack: Self::DEFAULT_INTERSECTION_SLACK,
            zero_length_tolerance: Self::DEFAULT_ZERO_LENGTH_TOLERANCE,
            individual_offset_mm: Self::DEFAULT_INDIVIDUAL_OFFSET_MM,
            overall_offset_mm: Self::DEFAULT_OVERALL_OFFSET_MM,
            line_padding: Self::DEFAULT_LINE_PADDING,
            elevation_epsilon: Self::DEFAULT_ELEVATION_EPSILON,
            length_unit: LengthUnit::Feet,
        }
    }
}
