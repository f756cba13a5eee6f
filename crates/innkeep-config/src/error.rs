//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A config file exists but is not valid TOML for our schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// No API key available in the environment.
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
}
