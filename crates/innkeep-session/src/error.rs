//! Error types for the session crate.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur in a memory session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user identifier cannot be turned into a snapshot path.
    #[error("invalid user id {0:?}: only alphanumerics, '.', '_' and '-' are allowed")]
    InvalidUserId(String),

    /// The underlying memory store failed.
    #[error(transparent)]
    Memory(#[from] innkeep_memory::MemoryError),

    /// A provider call failed.
    #[error(transparent)]
    Llm(#[from] innkeep_llm::LlmError),

    /// Storage directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
