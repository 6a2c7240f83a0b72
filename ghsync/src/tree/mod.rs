//! Local tree probing.
//!
//! Working copies live at `<base_dir>/<owner>/<name>`. This module computes
//! those paths, creates owner directories and checks what is already on disk.

mod error;

pub use error::TreeError;

use bstr::ByteSlice;
use gix_validate::path::component;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What is on disk at a working-copy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalState {
    /// Nothing, or something that is not a directory.
    Absent,
    /// A directory containing `.git`.
    Present,
    /// A directory without `.git`.
    Unmanaged,
}

impl LocalState {
    /// Whether a directory exists, regardless of its contents.
    #[must_use]
    pub fn exists(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Directory holding every working copy of `owner`.
#[must_use]
pub fn owner_dir(base_dir: &Path, owner: &str) -> PathBuf {
    base_dir.join(owner)
}

/// Canonical working-copy path: `<base_dir>/<owner>/<name>`.
#[must_use]
pub fn working_copy_path(base_dir: &Path, owner: &str, name: &str) -> PathBuf {
    owner_dir(base_dir, owner).join(name)
}

/// Returns true if a directory exists at the working-copy path.
///
/// No version-control validation is done; any directory counts.
#[must_use]
pub fn exists(owner: &str, name: &str, base_dir: &Path) -> bool {
    working_copy_path(base_dir, owner, name).is_dir()
}

/// Classifies the working-copy path.
#[must_use]
pub fn local_state(owner: &str, name: &str, base_dir: &Path) -> LocalState {
    let path = working_copy_path(base_dir, owner, name);
    let state = if !path.is_dir() {
        LocalState::Absent
    } else if path.join(".git").exists() {
        LocalState::Present
    } else {
        LocalState::Unmanaged
    };
    debug!(path = %path.display(), ?state, "Inspected working copy");
    state
}

/// Checks that `name` can be used as a single directory name.
///
/// # Errors
///
/// Returns [`TreeError::UnsafeName`] for empty names, `.`/`..`, separators
/// and `.git`. Names reserved on Windows are only rejected on Windows.
pub fn validate_component(name: &str) -> Result<(), TreeError> {
    if name == "." || name == ".." {
        return Err(TreeError::UnsafeName {
            name: name.to_string(),
            reason: "relative path component".to_string(),
        });
    }

    let options = component::Options {
        protect_windows: cfg!(windows),
        ..Default::default()
    };
    component(name.as_bytes().as_bstr(), None, options)
        .map(|_| ())
        .map_err(|e| TreeError::UnsafeName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Creates the owner directory if needed, returning its path.
///
/// An existing directory is not an error.
///
/// # Errors
///
/// Returns [`TreeError::OwnerDirectory`] for any other filesystem failure,
/// including a non-directory already occupying the path.
pub async fn ensure_owner_dir(base_dir: &Path, owner: &str) -> Result<PathBuf, TreeError> {
    let path = owner_dir(base_dir, owner);

    match tokio::fs::create_dir_all(&path).await {
        Ok(()) => Ok(path),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(path),
        Err(e) => Err(TreeError::OwnerDirectory {
            path: path.display().to_string(),
            source: e,
        }),
    }
}
