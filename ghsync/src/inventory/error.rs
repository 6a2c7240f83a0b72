//! Inventory error types.

use thiserror::Error;

/// Errors that can occur while listing remote repositories.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The credentials were rejected.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
