//! Operation result types.

use std::path::PathBuf;

/// The kind of action taken for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// The repository as a whole, when it is skipped before any decision.
    Sync,
    /// `git clone` of a missing working copy.
    Clone,
    /// `git pull` of an existing working copy.
    Pull,
    /// `git remote add upstream` on a fork.
    AddUpstream,
}

impl OperationKind {
    /// Returns the kind as a display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Clone => "clone",
            Self::Pull => "pull",
            Self::AddUpstream => "add upstream",
        }
    }
}

/// Outcome of a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// Would have run; dry-run mode.
    Planned,

    /// Ran and succeeded.
    Succeeded,

    /// Not attempted.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Ran and failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl OperationStatus {
    /// Returns the status as a display string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Succeeded => "succeeded",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Result of one operation against one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    /// Repository full name ("owner/name").
    pub repository: String,

    /// What was attempted.
    pub kind: OperationKind,

    /// Working-copy path the operation targeted.
    pub path: PathBuf,

    /// Remote URL involved, for clones and remote additions.
    pub url: Option<String>,

    /// How it went.
    pub status: OperationStatus,
}

impl OperationResult {
    /// Returns true if the operation ran and failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OperationStatus::Failed { .. })
    }
}
