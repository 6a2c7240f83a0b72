//! Orchestrates a complete sync run.

mod error;

pub use error::RunnerError;

use crate::config::SyncConfig;
use crate::inventory::{enrich_with_parents, fetch_inventory, RepositoryInventory};
use crate::reconcile::Reconciler;
use crate::summary::RunSummary;
use crate::vcs::VcsExecutor;
use tracing::{info, warn};

/// Authenticates, lists the inventory and reconciles it.
pub struct Runner<I, V> {
    inventory: I,
    reconciler: Reconciler<V>,
}

impl<I: RepositoryInventory, V: VcsExecutor> Runner<I, V> {
    /// Builds a runner from its collaborators.
    pub fn new(config: SyncConfig, inventory: I, executor: V) -> Self {
        Self {
            inventory,
            reconciler: Reconciler::new(config, executor),
        }
    }

    /// Executes the full sync flow.
    ///
    /// Authentication happens before anything touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on authentication or listing failure, or when an
    /// owner directory cannot be created.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let config = self.reconciler.config();
        let mut summary = RunSummary::new(config.dry_run());

        let login = self.inventory.authenticate().await?;
        info!(
            login = %login,
            base_dir = %config.base_dir().display(),
            organization = config.organization().unwrap_or("<all>"),
            upstream = config.link_upstream(),
            "Starting sync"
        );

        let mut repositories = fetch_inventory(&self.inventory, config.organization()).await?;
        if repositories.is_empty() {
            warn!("No repositories found");
            return Ok(summary);
        }

        if config.link_upstream() {
            enrich_with_parents(&self.inventory, &mut repositories).await;
        }

        summary.repositories_processed = repositories.len();
        for result in self.reconciler.reconcile(&repositories).await? {
            summary.record_result(&result);
        }

        info!(
            failures = summary.failures(),
            skipped = summary.skipped,
            "Sync complete"
        );
        Ok(summary)
    }
}
