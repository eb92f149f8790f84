// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transactional hand-off of built chains to the host.

use datum_dims_core::{DimensionChain, Error, Result};
use tracing::{error, info};

use crate::host::{MutationBoundary, ViewAccessor};

/// Transaction name used by the whole-view command.
pub const AUTOMATIC_TRANSACTION: &str = "Auto-dimension datums";

/// Transaction name used by the picked-line command.
pub const ALONG_LINE_TRANSACTION: &str = "Dimension datums along line";

/// Creates one host dimension per chain inside a single transaction.
///
/// The transaction is committed only when every chain was created. Any
/// failure rolls the whole transaction back and is returned as
/// [`Error::Mutation`]; nothing is left half-created.
pub fn materialize<B: MutationBoundary + ?Sized>(
    boundary: &mut B,
    view: &dyn ViewAccessor,
    chains: &[DimensionChain],
    transaction_name: &str,
) -> Result<Vec<B::Handle>> {
    if chains.is_empty() {
        return Err(Error::InsufficientCandidates { found: 0 });
    }

    boundary
        .begin_transaction(transaction_name)
        .map_err(into_mutation)?;

    let mut handles = Vec::with_capacity(chains.len());
    for chain in chains {
        match boundary.create_dimension(view, &chain.anchor, &chain.references) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                error!(
                    transaction = transaction_name,
                    error = %err,
                    created = handles.len(),
                    "Dimension creation failed, rolling back"
                );
                boundary.rollback();
                return Err(into_mutation(err));
            }
        }
    }

    if let Err(err) = boundary.commit() {
        error!(transaction = transaction_name, error = %err, "Commit failed, rolling back");
        boundary.rollback();
        return Err(into_mutation(err));
    }

    info!(
        transaction = transaction_name,
        dimensions = handles.len(),
        "Committed dimensions"
    );
    Ok(handles)
}

fn into_mutation(err: Error) -> Error {
    match err {
        Error::Mutation(_) => err,
        other => Error::Mutation(other.to_string()),
    }
}
