//! Per-repository sync decisions.

use crate::inventory::RemoteRepository;

/// What to do with one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// Clone the missing working copy.
    Clone,
    /// Pull the existing working copy.
    Pull,
    /// Clone, then add the `upstream` remote.
    ClonePlusUpstream,
    /// Pull, then add the `upstream` remote.
    PullPlusUpstream,
}

impl SyncDecision {
    /// Decides from the repository, whether its working copy exists and
    /// whether forks are to be linked.
    #[must_use]
    pub fn decide(repository: &RemoteRepository, exists: bool, link_upstream: bool) -> Self {
        let upstream = repository.is_fork && link_upstream;
        match (exists, upstream) {
            (true, false) => Self::Pull,
            (true, true) => Self::PullPlusUpstream,
            (false, false) => Self::Clone,
            (false, true) => Self::ClonePlusUpstream,
        }
    }

    /// Whether the working copy has to be cloned.
    #[must_use]
    pub fn clones(self) -> bool {
        matches!(self, Self::Clone | Self::ClonePlusUpstream)
    }

    /// Whether an `upstream` remote is added afterwards.
    #[must_use]
    pub fn links_upstream(self) -> bool {
        matches!(self, Self::ClonePlusUpstream | Self::PullPlusUpstream)
    }
}

/// Picks the clone source: SSH for private repositories, HTTPS otherwise.
#[must_use]
pub fn select_clone_url(repository: &RemoteRepository) -> &str {
    if repository.is_private {
        &repository.ssh_url
    } else {
        &repository.clone_url
    }
}
