//! Error types for the memory crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors that can occur in the memory store.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The embedding provider call failed; nothing was mutated.
    #[error("embedding provider error: {0}")]
    Upstream(#[from] innkeep_llm::LlmError),

    /// Empty or malformed input, rejected before any mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A vector of the wrong size reached the index. This indicates a
    /// programming error, not a recoverable condition.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The snapshot file exists but does not round-trip into an aligned
    /// record/vector pair.
    #[error("corrupt snapshot at {path}: {reason}")]
    SnapshotCorrupt { path: PathBuf, reason: String },

    /// File I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
