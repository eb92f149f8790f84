// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory mutation boundary and picker.

use std::collections::VecDeque;

use datum_dims_core::{AnchorLine, DatumId, Error, Result};
use nalgebra::Point3;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::host::{MutationBoundary, Picker, ViewAccessor};

/// Handle of a dimension created in a [`RecordingDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DimensionHandle(pub u64);

/// A dimension as the document stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDimension {
    pub handle: DimensionHandle,
    pub view_id: String,
    pub anchor: AnchorLine,
    pub references: Vec<DatumId>,
}

/// Outcome of one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub name: String,
    pub committed: bool,
    pub dimensions: usize,
}

#[derive(Debug)]
struct OpenTransaction {
    name: String,
    created: Vec<RecordedDimension>,
}

/// Document that keeps committed dimensions in memory.
///
/// Datums registered with [`RecordingDocument::rejecting`] make
/// `create_dimension` fail, the way a host refuses an invalid reference.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    dimensions: Vec<RecordedDimension>,
    transactions: Vec<TransactionRecord>,
    open: Option<OpenTransaction>,
    rejected: FxHashSet<DatumId>,
    next_handle: u64,
}

impl RecordingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses any dimension referencing `id`.
    pub fn rejecting(mut self, id: impl Into<DatumId>) -> Self {
        self.rejected.insert(id.into());
        self
    }

    /// Committed dimensions in creation order.
    pub fn dimensions(&self) -> &[RecordedDimension] {
        &self.dimensions
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn has_open_transaction(&self) -> bool {
        self.open.is_some()
    }

    fn close(&mut self, committed: bool) -> Option<OpenTransaction> {
        let open = self.open.take()?;
        self.transactions.push(TransactionRecord {
            name: open.name.clone(),
            committed,
            dimensions: open.created.len(),
        });
        Some(open)
    }
}

impl MutationBoundary for RecordingDocument {
    type Handle = DimensionHandle;

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        if let Some(open) = &self.open {
            return Err(Error::Mutation(format!(
                "transaction '{}' is still open",
                open.name
            )));
        }
        self.open = Some(OpenTransaction {
            name: name.to_string(),
            created: Vec::new(),
        });
        Ok(())
    }

    fn create_dimension(
        &mut self,
        view: &dyn ViewAccessor,
        anchor: &AnchorLine,
        references: &[DatumId],
    ) -> Result<DimensionHandle> {
        if references.len() < 2 {
            return Err(Error::Mutation(format!(
                "a dimension needs two references, got {}",
                references.len()
            )));
        }
        if let Some(id) = references.iter().find(|id| self.rejected.contains(*id)) {
            return Err(Error::Mutation(format!("reference {id} is not valid")));
        }

        let handle = DimensionHandle(self.next_handle);
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| Error::Mutation("no open transaction".to_string()))?;
        open.created.push(RecordedDimension {
            handle,
            view_id: view.view_id().to_string(),
            anchor: *anchor,
            references: references.to_vec(),
        });
        self.next_handle += 1;
        Ok(handle)
    }

    fn commit(&mut self) -> Result<()> {
        let open = self
            .close(true)
            .ok_or_else(|| Error::Mutation("no open transaction".to_string()))?;
        self.dimensions.extend(open.created);
        Ok(())
    }

    fn rollback(&mut self) {
        self.close(false);
    }
}

/// Picker that replays a fixed sequence; `None` entries cancel.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    picks: VecDeque<Option<Point3<f64>>>,
    prompts: Vec<String>,
}

impl ScriptedPicker {
    pub fn new(picks: impl IntoIterator<Item = Option<Point3<f64>>>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Picks every point in order, never cancelling.
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Self {
        Self::new(points.into_iter().map(Some))
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Picker for ScriptedPicker {
    fn pick_point(&mut self, prompt: &str) -> Option<Point3<f64>> {
        self.prompts.push(prompt.to_string());
        self.picks.pop_front().flatten()
    }
}
