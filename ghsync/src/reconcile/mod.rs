//! Repository reconciliation.
//!
//! For every remote repository the [`Reconciler`] checks the local tree,
//! decides between cloning and pulling, optionally links forks to their
//! parent, and records the outcome of each operation. Operation failures are
//! recorded and never stop the run; only an owner directory that cannot be
//! created does.

mod decision;
mod error;

pub use decision::{select_clone_url, SyncDecision};
pub use error::ReconcileError;

use crate::config::SyncConfig;
use crate::inventory::RemoteRepository;
use crate::summary::{OperationKind, OperationResult, OperationStatus};
use crate::tree::{self, LocalState};
use crate::vcs::{VcsError, VcsExecutor, UPSTREAM_REMOTE};
use console::style;
use std::path::PathBuf;
use tracing::{info, info_span, warn, Instrument};

/// Brings the local tree in line with the remote inventory.
pub struct Reconciler<V> {
    config: SyncConfig,
    executor: V,
}

impl<V: VcsExecutor> Reconciler<V> {
    /// Creates a reconciler running operations through `executor`.
    pub fn new(config: SyncConfig, executor: V) -> Self {
        Self { config, executor }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Reconciles every repository, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] if an owner directory cannot be created.
    pub async fn reconcile(
        &self,
        repositories: &[RemoteRepository],
    ) -> Result<Vec<OperationResult>, ReconcileError> {
        let mut results = Vec::new();
        let total = repositories.len();

        for (i, repository) in repositories.iter().enumerate() {
            let span = info_span!(
                "reconcile",
                repo = %repository.full_name(),
                index = i + 1,
                total
            );
            self.reconcile_repository(repository, &mut results)
                .instrument(span)
                .await?;
        }

        Ok(results)
    }

    async fn reconcile_repository(
        &self,
        repository: &RemoteRepository,
        results: &mut Vec<OperationResult>,
    ) -> Result<(), ReconcileError> {
        let base_dir = self.config.base_dir();
        let path = tree::working_copy_path(base_dir, &repository.owner, &repository.name);
        let record = Recorder {
            repository: repository.full_name(),
            path: path.clone(),
        };

        if let Err(e) = tree::validate_component(&repository.owner)
            .and_then(|()| tree::validate_component(&repository.name))
        {
            warn!(error = %e, "Skipping repository with unsafe name");
            results.push(record.skipped(OperationKind::Sync, None, e.to_string()));
            return Ok(());
        }

        if !self.config.dry_run() {
            tree::ensure_owner_dir(base_dir, &repository.owner).await?;
        }

        let exists = if self.config.verify_working_copies() {
            match tree::local_state(&repository.owner, &repository.name, base_dir) {
                LocalState::Unmanaged => {
                    warn!(path = %path.display(), "Directory is not a git working copy");
                    results.push(record.skipped(
                        OperationKind::Pull,
                        None,
                        "directory exists but is not a git working copy".to_string(),
                    ));
                    return Ok(());
                }
                state => state.exists(),
            }
        } else {
            tree::exists(&repository.owner, &repository.name, base_dir)
        };

        let decision = SyncDecision::decide(repository, exists, self.config.link_upstream());
        info!(?decision, "Decided");

        let working_copy_ready = if decision.clones() {
            let url = select_clone_url(repository);
            let label = if repository.is_private {
                "Cloning private repo"
            } else {
                "Cloning repo"
            };
            let result = self
                .run(
                    &record,
                    OperationKind::Clone,
                    Some(url),
                    label,
                    &repository.name,
                    || self.executor.clone_repository(url, &path),
                )
                .await;
            let succeeded = !result.is_failure();
            results.push(result);
            succeeded
        } else {
            let result = self
                .run(
                    &record,
                    OperationKind::Pull,
                    None,
                    "Updating repo",
                    &repository.name,
                    || self.executor.pull(&path),
                )
                .await;
            results.push(result);
            true
        };

        if decision.links_upstream() {
            let result = self
                .link_upstream(repository, &record, working_copy_ready)
                .await;
            results.push(result);
        }

        Ok(())
    }

    async fn link_upstream(
        &self,
        repository: &RemoteRepository,
        record: &Recorder,
        working_copy_ready: bool,
    ) -> OperationResult {
        let Some(url) = repository.parent_url() else {
            warn!("Fork parent unknown, not adding upstream");
            return record.skipped(
                OperationKind::AddUpstream,
                None,
                "parent repository unknown".to_string(),
            );
        };

        if !working_copy_ready {
            return record.skipped(
                OperationKind::AddUpstream,
                Some(url),
                "clone failed".to_string(),
            );
        }

        let parent = repository
            .parent
            .as_deref()
            .map(RemoteRepository::full_name)
            .unwrap_or_default();
        self.run(
            record,
            OperationKind::AddUpstream,
            Some(url),
            "Adding upstream",
            &parent,
            || self.executor.add_remote(UPSTREAM_REMOTE, url, &record.path),
        )
        .await
    }

    /// Prints the status line, then runs the operation unless this is a dry run.
    async fn run<F, Fut>(
        &self,
        record: &Recorder,
        kind: OperationKind,
        url: Option<&str>,
        label: &str,
        subject: &str,
        operation: F,
    ) -> OperationResult
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<(), VcsError>>,
    {
        if self.config.dry_run() {
            print_status(&format!("[DRY RUN] {label}: {subject}"));
            return record.finish(kind, url, OperationStatus::Planned);
        }

        print_status(&format!("{label}: {subject}"));
        let status = match operation().await {
            Ok(()) => {
                info!(operation = kind.as_str(), "Operation succeeded");
                OperationStatus::Succeeded
            }
            Err(e) => {
                warn!(operation = kind.as_str(), error = %e, "Operation failed");
                OperationStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        record.finish(kind, url, status)
    }
}

/// Builds results for one repository.
struct Recorder {
    repository: String,
    path: PathBuf,
}

impl Recorder {
    fn finish(
        &self,
        kind: OperationKind,
        url: Option<&str>,
        status: OperationStatus,
    ) -> OperationResult {
        OperationResult {
            repository: self.repository.clone(),
            kind,
            path: self.path.clone(),
            url: url.map(str::to_string),
            status,
        }
    }

    fn skipped(&self, kind: OperationKind, url: Option<&str>, reason: String) -> OperationResult {
        self.finish(kind, url, OperationStatus::Skipped { reason })
    }
}

/// Highlighted console line for an action.
fn print_status(line: &str) {
    println!("{}", style(line).red());
}
