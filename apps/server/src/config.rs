// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::str::FromStr;

use datum_dims_core::{DimensionConfig, LengthUnit};

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in KB.
    pub max_body_kb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Default paper gap of the individual chain (mm).
    pub individual_offset_mm: f64,
    /// Default paper gap between individual and overall chains (mm).
    pub overall_offset_mm: f64,
    /// Internal length unit of submitted scenes.
    pub length_unit: LengthUnit,
    /// Emit JSON log lines instead of pretty output.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup; unset or unparsable
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            max_body_kb: parsed(&lookup, "MAX_BODY_KB").unwrap_or(2048),
            request_timeout_secs: parsed(&lookup, "REQUEST_TIMEOUT_SECS").unwrap_or(30),
            individual_offset_mm: offset_mm(&lookup, "DIM_INDIVIDUAL_OFFSET_MM")
                .unwrap_or(DimensionConfig::DEFAULT_INDIVIDUAL_OFFSET_MM),
            overall_offset_mm: offset_mm(&lookup, "DIM_OVERALL_OFFSET_MM")
                .unwrap_or(DimensionConfig::DEFAULT_OVERALL_OFFSET_MM),
            length_unit: lookup("DIM_LENGTH_UNIT")
                .and_then(|v| LengthUnit::parse(&v))
                .unwrap_or_default(),
            log_json: lookup("LOG_FORMAT")
                .map(|v| v.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Engine configuration used when a request does not supply its own.
    pub fn dimension_config(&self) -> DimensionConfig {
        DimensionConfig {
            individual_offset_mm: self.individual_offset_mm,
            overall_offset_mm: self.overall_offset_mm,
            length_unit: self.length_unit,
            ..DimensionConfig::default()
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn offset_mm(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    parsed::<f64>(lookup, key).filter(|v| v.is_finite() && *v >= 0.0)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
