//! Provider clients for innkeep.
//!
//! This crate defines the two external capabilities the memory core consumes:
//!
//! - [`Embedder`]: text → fixed-dimension vector, used for similarity search
//! - [`LanguageModel`]: prompt → text, used for retrieval-augmented answers
//!
//! Both are traits with OpenAI HTTP implementations ([`OpenAiEmbedder`],
//! [`OpenAiModel`]) and deterministic mocks ([`MockEmbedder`], [`MockModel`])
//! so the core can be tested without network access. Calls are not retried
//! here; retry policy belongs to callers.

pub mod embeddings;
pub mod error;
pub mod model;
pub mod openai;

pub use embeddings::{Embedder, MockEmbedder, SharedEmbedder};
pub use error::{LlmError, Result};
pub use model::{ChatRequest, LanguageModel, MockModel, SharedLanguageModel};
pub use openai::{OpenAiConfig, OpenAiEmbedder, OpenAiModel};
