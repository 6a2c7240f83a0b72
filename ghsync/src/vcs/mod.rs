//! Version-control operations.
//!
//! Every operation takes absolute paths; the process working directory is
//! never changed.

mod error;

pub use error::VcsError;

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Name of the remote pointing at a fork's parent.
pub const UPSTREAM_REMOTE: &str = "upstream";

/// Runs clone, pull and remote-add against working copies.
#[allow(async_fn_in_trait)]
pub trait VcsExecutor {
    /// Clones `url` into `destination`, which must not exist yet.
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), VcsError>;

    /// Updates the working copy from its tracked remote.
    async fn pull(&self, working_copy: &Path) -> Result<(), VcsError>;

    /// Adds a named remote to the working copy.
    async fn add_remote(&self, name: &str, url: &str, working_copy: &Path)
        -> Result<(), VcsError>;
}

/// [`VcsExecutor`] backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Uses `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Uses a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs a git command, optionally inside `cwd`.
    async fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<(), VcsError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command, cwd = ?cwd, "Running git");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            // Never block on a credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.output().await.map_err(|e| VcsError::Spawn {
            command: command.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsExecutor for GitCli {
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), VcsError> {
        let destination = destination.to_string_lossy();
        self.run(None, &["clone", "--", url, &*destination])
            .await
    }

    async fn pull(&self, working_copy: &Path) -> Result<(), VcsError> {
        self.run(Some(working_copy), &["pull"]).await
    }

    async fn add_remote(
        &self,
        name: &str,
        url: &str,
        working_copy: &Path,
    ) -> Result<(), VcsError> {
        self.run(Some(working_copy), &["remote", "add", name, url])
            .await
    }
}
