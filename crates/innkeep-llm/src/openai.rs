//! OpenAI-backed providers.
//!
//! One config covers both the embeddings endpoint and the chat completions
//! endpoint; the two clients share the same base URL, key, and timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::embeddings::Embedder;
use crate::error::{LlmError, Result};
use crate::model::{ChatRequest, LanguageModel};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration shared by the OpenAI embedder and chat model.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for bearer authentication.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Embedding model.
    pub embedding_model: String,
    /// Chat completion model.
    pub chat_model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create a config with the given API key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create a config from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LlmError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the chat completion model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Internal(format!("failed to create HTTP client: {e}")))
    }
}

/// Map a non-success status to the right error kind.
fn status_error(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Auth(format!("HTTP {status}: {body}"))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            LlmError::InvalidRequest(format!("HTTP {status}: {body}"))
        }
        _ => LlmError::Upstream(format!("HTTP {status}: {body}")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Embedder
// ─────────────────────────────────────────────────────────────────────────────

/// OpenAI embeddings API client.
pub struct OpenAiEmbedder {
    client: Client,
    config: OpenAiConfig,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Create an embedder from the given config.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = config.build_client()?;
        let dimensions = match config.embedding_model.as_str() {
            "text-embedding-3-large" => 3072,
            // text-embedding-3-small, text-embedding-ada-002, and unknown
            _ => 1536,
        };

        Ok(Self {
            client,
            config,
            dimensions,
        })
    }

    fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.config.base_url)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Upstream("no embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(LlmError::InvalidRequest(
                "cannot embed empty text".to_string(),
            ));
        }

        // The embeddings endpoint treats newlines poorly; flatten them.
        let request = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: texts.iter().map(|t| t.replace('\n', " ")).collect(),
        };

        debug!(model = %request.model, count = texts.len(), "requesting embeddings");

        let response = self
            .client
            .post(self.embeddings_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Serialization(format!("failed to parse response: {e}")))?;

        // The API may return data out of order; restore request order.
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat Model
// ─────────────────────────────────────────────────────────────────────────────

/// OpenAI chat completions API client.
pub struct OpenAiModel {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiModel {
    /// Create a chat model client from the given config.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        if request.prompt.trim().is_empty() {
            return Err(LlmError::InvalidRequest(
                "cannot complete an empty prompt".to_string(),
            ));
        }

        let body = CompletionsRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
        };

        debug!(model = %body.model, "requesting chat completion");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        let result: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Serialization(format!("failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Upstream("no completion choices returned".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct CompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_follow_model() {
        let small = OpenAiEmbedder::new(OpenAiConfig::new("k")).unwrap();
        assert_eq!(small.dimensions(), 1536);

        let large = OpenAiEmbedder::new(
            OpenAiConfig::new("k").with_embedding_model("text-embedding-3-large"),
        )
        .unwrap();
        assert_eq!(large.dimensions(), 3072);
    }

    #[tokio::test]
    async fn empty_text_rejected_before_any_request() {
        let embedder = OpenAiEmbedder::new(OpenAiConfig::new("k")).unwrap();
        let err = embedder.embed("   ").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn empty_prompt_rejected_before_any_request() {
        let model = OpenAiModel::new(OpenAiConfig::new("k")).unwrap();
        let err = model.complete(ChatRequest::new("sys", "")).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}
