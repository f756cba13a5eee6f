//! Completion provider abstraction.
//!
//! The [`LanguageModel`] trait covers the one capability the memory session
//! needs from a chat model: turn a composed prompt into a text answer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{LlmError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Request Type
// ─────────────────────────────────────────────────────────────────────────────

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// System instruction for the model.
    pub system: String,
    /// User-role prompt content.
    pub prompt: String,
}

impl ChatRequest {
    /// Create a request with a system instruction and user prompt.
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LanguageModel Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for completion providers.
///
/// The full text of the model's reply is returned as-is; no structured
/// output is assumed.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt and return the model's text response.
    async fn complete(&self, request: ChatRequest) -> Result<String>;

    /// Provider name, for logging.
    fn name(&self) -> &str;
}

/// A shared completion provider handle.
pub type SharedLanguageModel = Arc<dyn LanguageModel>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Model
// ─────────────────────────────────────────────────────────────────────────────

/// Mock completion provider for tests.
///
/// Returns queued responses in order and records every request so tests can
/// assert on the prompts that were composed.
pub struct MockModel {
    responses: std::sync::Mutex<Vec<String>>,
    request_log: std::sync::Mutex<Vec<ChatRequest>>,
}

impl MockModel {
    /// Create a mock with the given responses, returned in order.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            request_log: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that answers every request with the same text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![text.into()])
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.request_log.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.request_log.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.request_log.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::Upstream(
                "MockModel: no more responses available".to_string(),
            ));
        }
        Ok(responses.remove(0))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
