//! Config file discovery.
//!
//! Resolution order (first hit wins):
//! 1. Explicitly requested path (error if missing)
//! 2. `./innkeep.toml` (project-local)
//! 3. `<config_dir>/innkeep/config.toml` (user config)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::InnkeepConfig;

/// Project-local config filename.
const PROJECT_CONFIG_FILE: &str = "innkeep.toml";

/// Filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "innkeep";

/// Path of the user config file, if a config directory exists on this
/// platform.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(USER_CONFIG_FILE))
}

/// Load configuration.
///
/// With an explicit path the file must exist; otherwise the project-local
/// file, then the user config file, then defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<InnkeepConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return load_file(path);
    }

    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_file(&project);
    }

    if let Some(user) = user_config_path() {
        if user.exists() {
            return load_file(&user);
        }
    }

    Ok(InnkeepConfig::default())
}

/// Resolve the OpenAI API key from the environment.
pub fn resolve_api_key() -> Result<String> {
    std::env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)
}

fn load_file(path: &Path) -> Result<InnkeepConfig> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_path_errors() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn explicit_file_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("innkeep.toml");
        std::fs::write(&path, "[search]\ndefault-k = 7\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.search.default_k, 7);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("innkeep.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other}"),
        }
    }
}
