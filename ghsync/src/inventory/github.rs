//! GitHub-backed inventory using octocrab.

use crate::inventory::{InventoryError, RemoteRepository, RepositoryInventory};
use octocrab::models::orgs::Organization;
use octocrab::models::Repository;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Results per page for list endpoints.
const RESULTS_PER_PAGE: u8 = 100;

/// Lists repositories through the GitHub REST API.
pub struct GitHubInventory {
    octocrab: Octocrab,
}

impl GitHubInventory {
    /// Builds an authenticated client.
    ///
    /// With a username the secret is sent as a basic-auth password (a personal
    /// access token works there too); without one it is used as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::GitHubError`] if the client cannot be built.
    pub fn new(username: Option<String>, secret: String) -> Result<Self, InventoryError> {
        let builder = Octocrab::builder();
        let builder = match username {
            Some(username) => builder.basic_auth(username, secret),
            None => builder.personal_token(secret),
        };
        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    async fn list_organizations(&self) -> Result<Vec<String>, InventoryError> {
        let per_page = RESULTS_PER_PAGE.to_string();
        let page: Page<Organization> = self
            .octocrab
            .get("/user/orgs", Some(&[("per_page", per_page.as_str())]))
            .await?;
        let organizations = collect_pages(&self.octocrab, page).await?;
        Ok(organizations.into_iter().map(|org| org.login).collect())
    }
}

impl RepositoryInventory for GitHubInventory {
    async fn authenticate(&self) -> Result<String, InventoryError> {
        let user = self
            .octocrab
            .current()
            .user()
            .await
            .map_err(|e| InventoryError::AuthenticationFailed {
                message: e.to_string(),
            })?;
        info!(login = %user.login, "Authenticated");
        Ok(user.login)
    }

    async fn list_user_repositories(&self) -> Result<Vec<RemoteRepository>, InventoryError> {
        let page = self
            .octocrab
            .current()
            .list_repos_for_authenticated_user()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let mut repositories = convert(collect_pages(&self.octocrab, page).await?);
        debug!(count = repositories.len(), "Listed user repositories");

        for organization in self.list_organizations().await? {
            let org_repositories = self.list_organization_repositories(&organization).await?;
            repositories.extend(org_repositories);
        }

        Ok(repositories)
    }

    async fn list_organization_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RemoteRepository>, InventoryError> {
        let page = self
            .octocrab
            .orgs(organization)
            .list_repos()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let repositories = convert(collect_pages(&self.octocrab, page).await?);
        debug!(
            organization,
            count = repositories.len(),
            "Listed organization repositories"
        );
        Ok(repositories)
    }

    async fn resolve_parent(
        &self,
        repository: &RemoteRepository,
    ) -> Result<Option<RemoteRepository>, InventoryError> {
        let full = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get()
            .await?;
        Ok(full
            .parent
            .as_deref()
            .and_then(RemoteRepository::from_github))
    }
}

/// Follows `next` links until every page has been fetched.
async fn collect_pages<T: DeserializeOwned>(
    octocrab: &Octocrab,
    mut page: Page<T>,
) -> Result<Vec<T>, octocrab::Error> {
    let mut items = std::mem::take(&mut page.items);

    while let Some(mut next_page) = octocrab.get_page::<T>(&page.next).await? {
        items.append(&mut next_page.items);
        page.next = next_page.next;
    }

    Ok(items)
}

fn convert(repositories: Vec<Repository>) -> Vec<RemoteRepository> {
    repositories
        .iter()
        .filter_map(|repo| {
            let converted = RemoteRepository::from_github(repo);
            if converted.is_none() {
                warn!(name = %repo.name, "Skipping repository without owner");
            }
            converted
        })
        .collect()
}
