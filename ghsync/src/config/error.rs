//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while assembling the sync configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in the config file.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// The current directory could not be determined.
    #[error("Failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// `git config` could not provide the GitHub username.
    #[error("Failed to read GitHub username from git config: {message}")]
    GitConfig { message: String },

    /// No secret was supplied and the interactive prompt failed.
    #[error("Failed to read password from terminal: {0}")]
    PasswordPrompt(#[source] std::io::Error),
}
