//! Remote repository snapshot.

/// A repository visible to the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// Login of the owning user or organization.
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Whether the repository is private.
    pub is_private: bool,

    /// Whether the repository is a fork.
    pub is_fork: bool,

    /// SSH clone URL (e.g., "git@github.com:owner/name.git").
    pub ssh_url: String,

    /// HTTPS clone URL.
    pub clone_url: String,

    /// The repository this one was forked from, when known.
    pub parent: Option<Box<RemoteRepository>>,
}

impl RemoteRepository {
    /// Full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// URL the `upstream` remote should point at.
    #[must_use]
    pub fn parent_url(&self) -> Option<&str> {
        self.parent.as_deref().map(|parent| parent.clone_url.as_str())
    }

    /// Converts a GitHub API repository, returning `None` when it has no owner.
    pub(crate) fn from_github(repo: &octocrab::models::Repository) -> Option<Self> {
        let owner = repo.owner.as_ref()?.login.clone();
        let name = repo.name.clone();

        let ssh_url = repo
            .ssh_url
            .clone()
            .unwrap_or_else(|| format!("git@github.com:{owner}/{name}.git"));
        let clone_url = repo
            .clone_url
            .as_ref()
            .or(repo.git_url.as_ref())
            .map(|url| url.to_string())
            .unwrap_or_else(|| format!("https://github.com/{owner}/{name}.git"));
        let parent = repo
            .parent
            .as_deref()
            .and_then(Self::from_github)
            .map(Box::new);

        Some(Self {
            is_private: repo.private.unwrap_or(false),
            is_fork: repo.fork.unwrap_or(false),
            owner,
            name,
            ssh_url,
            clone_url,
            parent,
        })
    }
}
