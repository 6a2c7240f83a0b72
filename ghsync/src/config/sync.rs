//! Sync configuration passed into the reconciler.

use std::path::{Path, PathBuf};

/// Configuration for a single sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Absolute root directory; working copies live at `<base_dir>/<owner>/<name>`.
    base_dir: PathBuf,
    /// Restrict the inventory to one organization.
    organization: Option<String>,
    /// Whether forks get an `upstream` remote pointing at their parent.
    link_upstream: bool,
    /// Whether a directory needs a `.git` entry to count as a working copy.
    verify_working_copies: bool,
    /// Whether to report planned operations without running them.
    dry_run: bool,
}

impl SyncConfig {
    /// Creates a configuration syncing into `base_dir` with every option off.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            organization: None,
            link_upstream: false,
            verify_working_copies: false,
            dry_run: false,
        }
    }

    /// Scopes the run to a single organization.
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }

    /// Enables or disables upstream linking for forks.
    pub fn with_link_upstream(mut self, link_upstream: bool) -> Self {
        self.link_upstream = link_upstream;
        self
    }

    /// Enables or disables `.git` verification of existing directories.
    pub fn with_verify_working_copies(mut self, verify_working_copies: bool) -> Self {
        self.verify_working_copies = verify_working_copies;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the sync root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the organization scope, if any.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Returns whether forks are linked to their parent.
    pub fn link_upstream(&self) -> bool {
        self.link_upstream
    }

    /// Returns whether existing directories are verified.
    pub fn verify_working_copies(&self) -> bool {
        self.verify_working_copies
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
