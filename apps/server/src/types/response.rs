// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use datum_dims_core::{AnchorLine, ChainKind, DatumCategory, DatumId, DimensionChain};
use datum_dims_engine::{DimensionHandle, DimensionReport};
use serde::{Deserialize, Serialize};

/// Result of a dimensioning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionResponse {
    pub view_id: String,
    /// Created chains in creation order.
    pub chains: Vec<ChainResponse>,
    /// Datums that were left out, with the reason.
    pub skipped: Vec<SkippedResponse>,
    pub stats: RunStats,
}

/// One created dimension chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub handle: u64,
    pub kind: ChainKind,
    pub category: DatumCategory,
    pub references: Vec<DatumId>,
    pub anchor: AnchorResponse,
    /// Sweep coordinate or elevation of each reference.
    pub positions: Vec<f64>,
    pub segment_lengths: Vec<f64>,
    pub total_length: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnchorResponse {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedResponse {
    pub id: DatumId,
    pub reason: String,
}

/// Processing statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub chain_count: usize,
    pub skipped_count: usize,
    /// Total processing time (ms).
    pub processing_time_ms: u64,
}

impl From<&AnchorLine> for AnchorResponse {
    fn from(anchor: &AnchorLine) -> Self {
        Self {
            start: [anchor.start.x, anchor.start.y, anchor.start.z],
            end: [anchor.end.x, anchor.end.y, anchor.end.z],
        }
    }
}

impl ChainResponse {
    fn new(chain: DimensionChain, handle: DimensionHandle) -> Self {
        Self {
            handle: handle.0,
            kind: chain.kind,
            category: chain.category,
            anchor: AnchorResponse::from(&chain.anchor),
            segment_lengths: chain.segment_lengths(),
            total_length: chain.total_length(),
            references: chain.references,
            positions: chain.positions,
        }
    }
}

impl DimensionResponse {
    pub fn from_report(
        view_id: String,
        report: DimensionReport<DimensionHandle>,
        processing_time_ms: u64,
    ) -> Self {
        let skipped: Vec<SkippedResponse> = report
            .skipped
            .into_iter()
            .map(|s| SkippedResponse {
                id: s.id,
                reason: s.reason.to_string(),
            })
            .collect();
        let chains: Vec<ChainResponse> = report
            .chains
            .into_iter()
            .zip(report.handles)
            .map(|(chain, handle)| ChainResponse::new(chain, handle))
            .collect();

        Self {
            view_id,
            stats: RunStats {
                chain_count: chains.len(),
                skipped_count: skipped.len(),
                processing_time_ms,
            },
            chains,
            skipped,
        }
    }
}
