//! Vector-indexed memory for guest notes.
//!
//! This crate is the core of innkeep: it turns free text into a searchable
//! vector index, keeps that index position-aligned with the structured
//! record log, and round-trips both to a durable snapshot file.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  MemoryStore                                             │
//! │  ┌────────────────┐      ┌─────────────────────────────┐ │
//! │  │  RecordLog     │ i↔i  │  VectorIndex (squared L2)   │ │
//! │  │  MemoryRecord… │      │  Vec<f32>…                  │ │
//! │  └────────────────┘      └─────────────────────────────┘ │
//! │  add / search / persist / load / reset                   │
//! └──────────────────────────────────────────────────────────┘
//!                      │ snapshot (JSON, atomic rename)
//!                      ▼
//!            memory_<user_id>.json
//! ```
//!
//! The invariant the store exists to protect: the log and the index always
//! have equal length, and position *i* in each refers to the same memory.
//! Mutation happens only through `add` (embed, then append both) and `load`
//! (validated aligned pair), so a failure partway through never leaves them
//! misaligned.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use innkeep_llm::MockEmbedder;
//! use innkeep_memory::{MemoryStore, Metadata};
//!
//! # async fn demo() -> innkeep_memory::Result<()> {
//! let mut store = MemoryStore::new(Arc::new(MockEmbedder::default()));
//! store.add("Great stay", vec!["positive".into()], Metadata::new()).await?;
//!
//! let results = store.search("great stay", 5).await?;
//! store.persist(Path::new("memory_guest42.json"))?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod index;
pub mod log;
pub mod snapshot;
pub mod store;
pub mod types;

pub use error::{MemoryError, Result};
pub use index::VectorIndex;
pub use log::RecordLog;
pub use snapshot::Snapshot;
pub use store::{LoadOutcome, MemoryStore};
pub use types::{MemoryRecord, Metadata};
