//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the innkeep service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InnkeepConfig {
    /// Where per-user snapshots live.
    pub storage: StorageConfig,
    /// OpenAI provider settings.
    pub openai: OpenAiSettings,
    /// Retrieval defaults.
    pub search: SearchDefaults,
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Directory for per-user snapshot files. Defaults to the platform data
    /// dir (`<data_local_dir>/innkeep`), falling back to `./innkeep-data`.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the snapshot directory, applying the default when unset.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|d| d.join("innkeep"))
            .unwrap_or_else(|| PathBuf::from("innkeep-data"))
    }
}

/// OpenAI provider settings. The API key itself comes from the environment,
/// never from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OpenAiSettings {
    /// Base URL for the API.
    pub base_url: String,
    /// Embedding model.
    pub embedding_model: String,
    /// Chat completion model.
    pub chat_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Default result counts for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchDefaults {
    /// Top-k for plain search.
    pub default_k: usize,
    /// Top-k when gathering context for summarization/answering.
    pub summary_k: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_k: 5,
            summary_k: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = InnkeepConfig::default();
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.search.default_k, 5);
        assert_eq!(config.search.summary_k, 10);
    }

    #[test]
    fn kebab_case_keys_parse() {
        let config: InnkeepConfig = toml::from_str(
            r#"
            [storage]
            data-dir = "/tmp/innkeep"

            [openai]
            embedding-model = "text-embedding-3-large"

            [search]
            default-k = 3
            "#,
        )
        .unwrap();

        assert_eq!(
            config.storage.resolved_data_dir(),
            PathBuf::from("/tmp/innkeep")
        );
        assert_eq!(config.openai.embedding_model, "text-embedding-3-large");
        // Unset sections keep their defaults.
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.search.default_k, 3);
        assert_eq!(config.search.summary_k, 10);
    }
}
