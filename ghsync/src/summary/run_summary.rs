//! Run summary types.

use super::result::{OperationKind, OperationResult, OperationStatus};

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories in the inventory.
    pub repositories_processed: usize,

    /// Number of successful clones.
    pub clones_succeeded: usize,

    /// Number of failed clones.
    pub clones_failed: usize,

    /// Number of successful pulls.
    pub pulls_succeeded: usize,

    /// Number of failed pulls.
    pub pulls_failed: usize,

    /// Number of upstream remotes added.
    pub upstreams_linked: usize,

    /// Number of upstream remotes that failed to be added.
    pub upstreams_failed: usize,

    /// Number of operations skipped.
    pub skipped: usize,

    /// Number of operations planned in dry-run mode.
    pub planned: usize,

    /// Every failed or skipped operation, in order.
    pub problems: Vec<OperationResult>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an operation result.
    pub fn record_result(&mut self, result: &OperationResult) {
        match (&result.status, result.kind) {
            (OperationStatus::Planned, _) => self.planned += 1,
            (OperationStatus::Skipped { .. }, _) => {
                self.skipped += 1;
                self.problems.push(result.clone());
            }
            (OperationStatus::Succeeded, OperationKind::Clone) => self.clones_succeeded += 1,
            (OperationStatus::Succeeded, OperationKind::Pull) => self.pulls_succeeded += 1,
            (OperationStatus::Succeeded, OperationKind::AddUpstream) => {
                self.upstreams_linked += 1
            }
            (OperationStatus::Succeeded, OperationKind::Sync) => {}
            (OperationStatus::Failed { .. }, kind) => {
                match kind {
                    OperationKind::Clone => self.clones_failed += 1,
                    OperationKind::Pull => self.pulls_failed += 1,
                    OperationKind::AddUpstream => self.upstreams_failed += 1,
                    OperationKind::Sync => {}
                }
                self.problems.push(result.clone());
            }
        }
    }

    /// Total failed operations.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.clones_failed + self.pulls_failed + self.upstreams_failed
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
