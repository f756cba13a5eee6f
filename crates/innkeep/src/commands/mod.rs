//! Command implementations.

use anyhow::{Context as _, Result, bail};
use std::sync::Arc;
use std::time::Duration;

use innkeep_config::InnkeepConfig;
use innkeep_llm::{OpenAiConfig, OpenAiEmbedder, OpenAiModel};
use innkeep_memory::Metadata;
use innkeep_session::SessionManager;

pub mod add;
pub mod ask;
pub mod import;
pub mod reply;
pub mod reset;
pub mod search;
pub mod summarize;

/// Shared state passed to every command.
pub struct Context {
    /// Loaded configuration.
    pub config: InnkeepConfig,
    /// Emit JSON instead of styled text.
    pub json_output: bool,
    /// Verbose output.
    pub verbose: bool,
}

impl Context {
    /// Build a session manager with OpenAI-backed providers.
    pub fn manager(&self) -> Result<SessionManager> {
        let api_key =
            innkeep_config::resolve_api_key().context("an OpenAI API key is required")?;

        let provider_config = OpenAiConfig::new(api_key)
            .with_base_url(&self.config.openai.base_url)
            .with_embedding_model(&self.config.openai.embedding_model)
            .with_chat_model(&self.config.openai.chat_model)
            .with_timeout(Duration::from_secs(self.config.openai.timeout_secs));

        let embedder = Arc::new(OpenAiEmbedder::new(provider_config.clone())?);
        let model = Arc::new(OpenAiModel::new(provider_config)?);

        Ok(SessionManager::new(
            self.config.storage.resolved_data_dir(),
            embedder,
            model,
        ))
    }
}

/// Parse repeated `key=value` arguments into a metadata map.
///
/// Values are stored as strings; nested structure belongs in `import`'s JSON
/// input, not on the command line.
pub fn parse_metadata(pairs: &[String]) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("metadata must be key=value, got {pair:?}");
        };
        if key.is_empty() {
            bail!("metadata key must not be empty in {pair:?}");
        }
        metadata.insert(key.to_string(), value.into());
    }
    Ok(metadata)
}
