//! Sync configuration.
//!
//! Options come from three places: CLI flags, the `GHSYNC_DIR` environment
//! variable and an optional TOML settings file. The GitHub username defaults
//! to `git config github.user`.

mod error;
mod settings;
mod sync;

pub use error::ConfigError;
pub use settings::SyncSettings;
pub use sync::SyncConfig;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment variable holding the sync root.
pub const BASE_DIR_ENV: &str = "GHSYNC_DIR";

/// `git config` key holding the GitHub username.
pub const GIT_CONFIG_USER_KEY: &str = "github.user";

/// Resolves the absolute sync root.
///
/// Precedence: explicit path, then `GHSYNC_DIR`, then the settings file, then
/// the current directory. Relative paths are joined onto the current directory.
///
/// # Errors
///
/// Returns [`ConfigError::CurrentDir`] if the current directory is needed but unavailable.
pub fn resolve_base_dir(
    explicit: Option<PathBuf>,
    from_settings: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let chosen = explicit
        .or_else(|| {
            std::env::var_os(BASE_DIR_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or(from_settings)
        .unwrap_or_else(|| PathBuf::from("."));

    absolutize(&chosen)
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    if path == Path::new(".") {
        return Ok(cwd);
    }
    Ok(cwd.join(path))
}

/// Reads the GitHub username from `git config github.user`.
///
/// # Errors
///
/// Returns [`ConfigError::GitConfig`] if git cannot be run or the key is unset.
pub async fn read_git_config_user() -> Result<String, ConfigError> {
    let output = Command::new("git")
        .args(["config", GIT_CONFIG_USER_KEY])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ConfigError::GitConfig {
            message: format!("Failed to execute git config: {e}"),
        })?;

    if !output.status.success() {
        return Err(ConfigError::GitConfig {
            message: format!("'{GIT_CONFIG_USER_KEY}' is not set"),
        });
    }

    let user = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if user.is_empty() {
        return Err(ConfigError::GitConfig {
            message: format!("'{GIT_CONFIG_USER_KEY}' is empty"),
        });
    }

    debug!(user = %user, "Read GitHub username from git config");
    Ok(user)
}
