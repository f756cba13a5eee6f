//! Per-user memory sessions for innkeep.
//!
//! A [`MemorySession`] resolves a user identifier to a durable snapshot,
//! loads existing state on construction, and exposes the caller-facing
//! operations: structured-note capture, filtered semantic search,
//! retrieval-augmented answering and summarization, and reply drafting.
//!
//! [`SessionManager`] wraps session construction in a per-user async lock so
//! concurrent load→mutate→persist sequences for the same user cannot
//! silently drop each other's writes.

pub mod error;
pub mod manager;
pub mod prompts;
pub mod session;

pub use error::{Result, SessionError};
pub use manager::{SessionGuard, SessionManager, UserLocks};
pub use session::{
    DEFAULT_CONTEXT_K, DEFAULT_SEARCH_K, MemorySession, SearchHit, Summary, SummaryStyle,
};
