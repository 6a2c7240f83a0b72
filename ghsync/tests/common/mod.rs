//! Shared fakes for integration tests.

#![allow(dead_code)]

use ghsync::{InventoryError, RemoteRepository, RepositoryInventory, VcsError, VcsExecutor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A recorded version-control call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Clone {
        url: String,
        destination: PathBuf,
    },
    Pull {
        working_copy: PathBuf,
    },
    AddRemote {
        name: String,
        url: String,
        working_copy: PathBuf,
    },
}

/// Records calls; successful clones create the destination with a `.git` directory.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub fail_clones: bool,
    pub fail_pulls: bool,
}

impl RecordingExecutor {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clone_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Clone { .. }))
            .count()
    }

    fn failure(command: &str) -> VcsError {
        VcsError::CommandFailed {
            command: command.to_string(),
            code: Some(128),
            stderr: "fatal: simulated failure".to_string(),
        }
    }
}

impl VcsExecutor for RecordingExecutor {
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(Call::Clone {
            url: url.to_string(),
            destination: destination.to_path_buf(),
        });
        if self.fail_clones {
            return Err(Self::failure("git clone"));
        }
        std::fs::create_dir_all(destination.join(".git")).unwrap();
        Ok(())
    }

    async fn pull(&self, working_copy: &Path) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(Call::Pull {
            working_copy: working_copy.to_path_buf(),
        });
        if self.fail_pulls {
            return Err(Self::failure("git pull"));
        }
        Ok(())
    }

    async fn add_remote(
        &self,
        name: &str,
        url: &str,
        working_copy: &Path,
    ) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(Call::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
            working_copy: working_copy.to_path_buf(),
        });
        Ok(())
    }
}

/// In-memory inventory.
#[derive(Default)]
pub struct FakeInventory {
    pub reject_credentials: bool,
    pub user: Vec<RemoteRepository>,
    pub organizations: Vec<(String, Vec<RemoteRepository>)>,
    pub parents: HashMap<String, RemoteRepository>,
}

impl RepositoryInventory for FakeInventory {
    async fn authenticate(&self) -> Result<String, InventoryError> {
        if self.reject_credentials {
            return Err(InventoryError::AuthenticationFailed {
                message: "Bad credentials".to_string(),
            });
        }
        Ok("alice".to_string())
    }

    async fn list_user_repositories(&self) -> Result<Vec<RemoteRepository>, InventoryError> {
        let mut all = self.user.clone();
        for (_, repos) in &self.organizations {
            all.extend(repos.iter().cloned());
        }
        Ok(all)
    }

    async fn list_organization_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RemoteRepository>, InventoryError> {
        Ok(self
            .organizations
            .iter()
            .find(|(name, _)| name == organization)
            .map(|(_, repos)| repos.clone())
            .unwrap_or_default())
    }

    async fn resolve_parent(
        &self,
        repository: &RemoteRepository,
    ) -> Result<Option<RemoteRepository>, InventoryError> {
        Ok(self.parents.get(&repository.full_name()).cloned())
    }
}

pub fn repo(owner: &str, name: &str) -> RemoteRepository {
    RemoteRepository {
        owner: owner.to_string(),
        name: name.to_string(),
        is_private: false,
        is_fork: false,
        ssh_url: format!("git@github.com:{owner}/{name}.git"),
        clone_url: format!("https://github.com/{owner}/{name}.git"),
        parent: None,
    }
}

pub fn private_repo(owner: &str, name: &str) -> RemoteRepository {
    RemoteRepository {
        is_private: true,
        ..repo(owner, name)
    }
}

pub fn fork(owner: &str, name: &str, parent_url: Option<&str>) -> RemoteRepository {
    let parent = parent_url.map(|url| {
        Box::new(RemoteRepository {
            clone_url: url.to_string(),
            ..repo("upstream-owner", name)
        })
    });
    RemoteRepository {
        is_fork: true,
        parent,
        ..repo(owner, name)
    }
}
