// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host length units
//!
//! Offsets are specified in paper millimeters and must be converted to
//! whatever internal length unit the host model uses before they are
//! multiplied by the view scale.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MM_PER_FOOT: f64 = 304.8;
const MM_PER_INCH: f64 = 25.4;

/// Internal length unit of the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthUnit {
    #[default]
    Feet,
    Inches,
    Meters,
    Centimeters,
    Millimeters,
}

impl LengthUnit {
    /// Millimeters in one unit.
    #[inline]
    pub fn millimeters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Feet => MM_PER_FOOT,
            LengthUnit::Inches => MM_PER_INCH,
            LengthUnit::Meters => 1000.0,
            LengthUnit::Centimeters => 10.0,
            LengthUnit::Millimeters => 1.0,
        }
    }

    /// Converts a length in millimeters to this unit.
    #[inline]
    pub fn from_millimeters(&self, mm: f64) -> f64 {
        mm / self.millimeters_per_unit()
    }

    /// Converts a length in this unit to millimeters.
    #[inline]
    pub fn to_millimeters(&self, value: f64) -> f64 {
        value * self.millimeters_per_unit()
    }

    /// Parses a unit name such as `"ft"`, `"feet"`, `"METRE"` or `"mm"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "FT" | "FOOT" | "FEET" => Some(LengthUnit::Feet),
            "IN" | "INCH" | "INCHES" => Some(LengthUnit::Inches),
            "M" | "METRE" | "METER" | "METRES" | "METERS" => Some(LengthUnit::Meters),
            "CM" | "CENTIMETRE" | "CENTIMETER" | "CENTIMETRES" | "CENTIMETERS" => {
                Some(LengthUnit::Centimeters)
            }
            "MM" | "MILLIMETRE" | "MILLIMETER" | "MILLIMETRES" | "MILLIMETERS" => {
                Some(LengthUnit::Millimeters)
            }
            _ => None,
        }
    }

    /// Maps an SI prefix on the metre (`"MILLI"`, `"CENTI"`, or none) to a unit.
    ///
    /// Only the prefixes a building model realistically uses are supported.
    pub fn from_si_prefix(prefix: Option<&str>) -> Option<Self> {
        match prefix.map(|p| p.trim().to_ascii_uppercase()) {
            None => Some(LengthUnit::Meters),
            Some(p) => match p.as_str() {
                "" => Some(LengthUnit::Meters),
                "MILLI" => Some(LengthUnit::Millimeters),
                "CENTI" => Some(LengthUnit::Centimeters),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Inches => "in",
            LengthUnit::Meters => "m",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn millimeters_to_feet() {
        assert_relative_eq!(LengthUnit::Feet.from_millimeters(304.8), 1.0);
        assert_relative_eq!(LengthUnit::Feet.from_millimeters(8.0), 0.026246719160104987);
    }

    #[test]
    fn round_trip_through_millimeters() {
        for unit in [
            LengthUnit::Feet,
            LengthUnit::Inches,
            LengthUnit::Meters,
            LengthUnit::Centimeters,
            LengthUnit::Millimeters,
        ] {
            assert_relative_eq!(unit.from_millimeters(unit.to_millimeters(3.5)), 3.5);
        }
    }

    #[test]
    fn parse_names_and_prefixes() {
        assert_eq!(LengthUnit::parse("Feet"), Some(LengthUnit::Feet));
        assert_eq!(LengthUnit::parse(" mm "), Some(LengthUnit::Millimeters));
        assert_eq!(LengthUnit::parse("furlong"), None);
        assert_eq!(LengthUnit::from_si_prefix(Some("MILLI")), Some(LengthUnit::Millimeters));
        assert_eq!(LengthUnit::from_si_prefix(None), Some(LengthUnit::Meters));
        assert_eq!(LengthUnit::from_si_prefix(Some("KILO")), None);
    }
}
