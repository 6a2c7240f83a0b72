//! Version-control error types.

use thiserror::Error;

/// Errors reported by a version-control operation.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The command could not be started.
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully.
    #[error(
        "{command} failed (exit code {}): {stderr}",
        .code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}
