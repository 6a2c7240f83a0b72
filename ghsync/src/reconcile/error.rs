//! Reconciler error types.

use crate::tree::TreeError;
use thiserror::Error;

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The local tree could not be prepared.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
