//! The memory store: a record log and a vector index that move together.
//!
//! All mutation goes through [`MemoryStore::add`] and [`MemoryStore::load`],
//! which keep the two collections position-aligned. No caller can append to
//! one without the other.

use std::path::Path;
use tracing::{debug, info};

use innkeep_llm::SharedEmbedder;

use crate::error::{MemoryError, Result};
use crate::index::VectorIndex;
use crate::log::RecordLog;
use crate::snapshot::{self, Snapshot};
use crate::types::{MemoryRecord, Metadata};

/// Outcome of loading a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot existed and was applied.
    Loaded {
        /// Number of records restored.
        records: usize,
    },
    /// No snapshot exists yet; the store is empty. Expected for fresh users.
    NotFound,
}

/// Vector-indexed note store for one user.
pub struct MemoryStore {
    embedder: SharedEmbedder,
    index: VectorIndex,
    log: RecordLog,
}

impl MemoryStore {
    /// Create an empty store whose index dimensionality comes from the
    /// embedder.
    pub fn new(embedder: SharedEmbedder) -> Self {
        let dims = embedder.dimensions();
        Self {
            embedder,
            index: VectorIndex::new(dims),
            log: RecordLog::new(),
        }
    }

    /// Number of stored memories.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether the store holds no memories.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Iterate stored records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.log.iter()
    }

    /// Embed `text` and append it with its record as one logical step.
    ///
    /// If the embedding call fails, neither collection is mutated.
    pub async fn add(&mut self, text: &str, tags: Vec<String>, metadata: Metadata) -> Result<()> {
        if text.trim().is_empty() {
            return Err(MemoryError::InvalidInput(
                "memory text must not be empty".to_string(),
            ));
        }

        let vector = self.embedder.embed(text).await?;
        self.index.append(vector)?;
        let position = self.log.append(MemoryRecord::new(text, tags, metadata));

        debug_assert_eq!(self.index.len(), self.log.len());
        debug!(position, "added memory");
        Ok(())
    }

    /// Return up to `k` records nearest to `query`, ascending by squared-L2
    /// distance. An empty store yields an empty result.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<(MemoryRecord, f32)>> {
        if query.trim().is_empty() {
            return Err(MemoryError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        let hits = self.index.query(&vector, k.min(self.len()))?;

        // Every index position has a log entry by the alignment invariant.
        let mut results = Vec::with_capacity(hits.len());
        for (position, distance) in hits {
            let record = self.log.get(position).ok_or_else(|| {
                MemoryError::InvalidInput(format!("index position {position} has no record"))
            })?;
            results.push((record.clone(), distance));
        }
        Ok(results)
    }

    /// Write the durable snapshot for this store.
    ///
    /// The vectors already held by the index are persisted as-is rather than
    /// re-embedded; the store pins one embedder for its lifetime, so the two
    /// are equivalent and persist stays free of upstream calls.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let snapshot = Snapshot {
            records: self.log.iter().cloned().collect(),
            vectors: self.index.vectors().to_vec(),
        };
        snapshot::write_snapshot(path, &snapshot)?;
        info!(path = %path.display(), records = self.len(), "persisted memory store");
        Ok(())
    }

    /// Load the snapshot at `path`, replacing any in-memory state.
    ///
    /// A missing snapshot leaves the store empty and reports
    /// [`LoadOutcome::NotFound`]; a present but unparseable one is an error
    /// and the store is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let Some(snapshot) = snapshot::read_snapshot(path, self.index.dims())? else {
            return Ok(LoadOutcome::NotFound);
        };

        self.index.reset();
        self.log.clear();
        for vector in snapshot.vectors {
            self.index.append(vector)?;
        }
        for record in snapshot.records {
            self.log.append(record);
        }

        debug_assert_eq!(self.index.len(), self.log.len());
        Ok(LoadOutcome::Loaded {
            records: self.len(),
        })
    }

    /// Clear both collections and delete the snapshot file if one exists.
    ///
    /// Idempotent: resetting an already-reset store succeeds.
    pub fn reset(&mut self, path: &Path) -> Result<()> {
        self.index.reset();
        self.log.clear();
        snapshot::delete_snapshot(path)?;
        info!(path = %path.display(), "reset memory store");
        Ok(())
    }
}
