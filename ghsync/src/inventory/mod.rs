//! Remote repository inventory.
//!
//! The [`RepositoryInventory`] trait is the seam between the reconciler and the
//! hosting service; [`GitHubInventory`] is the production implementation.

mod error;
mod github;
mod repository;

pub use error::InventoryError;
pub use github::GitHubInventory;
pub use repository::RemoteRepository;

use std::collections::HashSet;
use tracing::{info, info_span, warn, Instrument};

/// Source of the repositories to mirror.
#[allow(async_fn_in_trait)]
pub trait RepositoryInventory {
    /// Verifies the credentials, returning the authenticated login.
    async fn authenticate(&self) -> Result<String, InventoryError>;

    /// Repositories of the authenticated user plus those of every organization they belong to.
    async fn list_user_repositories(&self) -> Result<Vec<RemoteRepository>, InventoryError>;

    /// Repositories of a single organization.
    async fn list_organization_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RemoteRepository>, InventoryError>;

    /// Looks up a fork's parent, which list endpoints leave out.
    async fn resolve_parent(
        &self,
        repository: &RemoteRepository,
    ) -> Result<Option<RemoteRepository>, InventoryError>;
}

/// Fetches the repositories to reconcile.
///
/// With an organization only that organization's listing is used. Repositories
/// reachable through several listings appear once, in first-seen order.
///
/// # Errors
///
/// Returns [`InventoryError`] if a listing fails.
pub async fn fetch_inventory<I: RepositoryInventory>(
    inventory: &I,
    organization: Option<&str>,
) -> Result<Vec<RemoteRepository>, InventoryError> {
    let span = info_span!("inventory", organization = organization.unwrap_or("<all>"));

    async {
        let repositories = match organization {
            Some(organization) => inventory.list_organization_repositories(organization).await?,
            None => inventory.list_user_repositories().await?,
        };

        let repositories = deduplicate(repositories);
        info!(count = repositories.len(), "Inventory complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Fills in the parent of every fork that lacks one.
///
/// Lookup failures are logged and leave the parent unset.
pub async fn enrich_with_parents<I: RepositoryInventory>(
    inventory: &I,
    repositories: &mut [RemoteRepository],
) {
    for repo in repositories
        .iter_mut()
        .filter(|repo| repo.is_fork && repo.parent.is_none())
    {
        match inventory.resolve_parent(repo).await {
            Ok(Some(parent)) => repo.parent = Some(Box::new(parent)),
            Ok(None) => {
                warn!(repo = %repo.full_name(), "Fork has no parent");
            }
            Err(e) => {
                warn!(
                    repo = %repo.full_name(),
                    error = %e,
                    "Failed to resolve fork parent"
                );
            }
        }
    }
}

fn deduplicate(repositories: Vec<RemoteRepository>) -> Vec<RemoteRepository> {
    let mut seen = HashSet::new();
    repositories
        .into_iter()
        .filter(|repo| seen.insert(repo.full_name()))
        .collect()
}
