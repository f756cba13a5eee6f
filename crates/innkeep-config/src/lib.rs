//! Configuration for the innkeep memory service.
//!
//! TOML-based settings with kebab-case keys, discovered from a project-local
//! `innkeep.toml` or the user config directory. The OpenAI API key is
//! resolved from the environment only and never read from config files.

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{load_config, resolve_api_key, user_config_path};
pub use error::{ConfigError, Result};
pub use types::{InnkeepConfig, OpenAiSettings, SearchDefaults, StorageConfig};
