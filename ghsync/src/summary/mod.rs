//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::{OperationKind, OperationResult, OperationStatus};
pub use run_summary::RunSummary;
