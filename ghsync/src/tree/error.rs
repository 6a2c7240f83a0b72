//! Local tree error types.

use thiserror::Error;

/// Errors raised while preparing the local directory tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// An owner or repository name is not a safe single path component.
    #[error("'{name}' is not a safe directory name: {reason}")]
    UnsafeName { name: String, reason: String },

    /// The owner directory could not be created.
    #[error("Failed to create owner directory '{path}': {source}")]
    OwnerDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
