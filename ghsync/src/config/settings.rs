//! Optional TOML settings file.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Defaults loaded from a settings file, overridden by CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncSettings {
    /// Root directory that owner directories are created under.
    pub base_dir: Option<PathBuf>,

    /// Restrict the run to a single organization.
    pub organization: Option<String>,

    /// Add an `upstream` remote to forks.
    #[serde(default)]
    pub upstream: bool,

    /// Require a `.git` entry before treating a directory as a working copy.
    #[serde(default)]
    pub verify_working_copies: bool,
}

impl SyncSettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: SyncSettings =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError {
                path: path.display().to_string(),
                source: e,
            })?;

        settings.validate(path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(organization) = &self.organization {
            if organization.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    path: path.display().to_string(),
                    message: "organization must not be empty".to_string(),
                });
            }
        }

        if let Some(base_dir) = &self.base_dir {
            if base_dir.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    path: path.display().to_string(),
                    message: "base-dir must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
