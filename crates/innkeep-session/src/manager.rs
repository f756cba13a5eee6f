//! Per-user session serialization.
//!
//! Each entry point reconstructs session state from disk, so two concurrent
//! operations for the same user would race: both load the same snapshot and
//! the last `save()` wins. The manager closes that window by funneling every
//! load→mutate→persist sequence for a user through one async mutex keyed by
//! user id. Different users proceed in parallel.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use innkeep_llm::{SharedEmbedder, SharedLanguageModel};

use crate::error::Result;
use crate::session::MemorySession;

/// Registry of per-user async locks.
#[derive(Default)]
pub struct UserLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a user.
    pub fn lock_for(&self, user_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock();
        map.entry(user_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

/// Opens per-user sessions with serialized access.
pub struct SessionManager {
    data_dir: PathBuf,
    embedder: SharedEmbedder,
    llm: SharedLanguageModel,
    locks: UserLocks,
}

impl SessionManager {
    /// Create a manager storing snapshots under `data_dir`.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        embedder: SharedEmbedder,
        llm: SharedLanguageModel,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            embedder,
            llm,
            locks: UserLocks::new(),
        }
    }

    /// Acquire the user's lock and open their session.
    ///
    /// The returned guard derefs to [`MemorySession`]; the lock is released
    /// when the guard drops, after the caller has saved or discarded the
    /// session.
    pub async fn session(&self, user_id: &str) -> Result<SessionGuard> {
        let lock = self.locks.lock_for(user_id);
        let guard = lock.lock_owned().await;

        let session = MemorySession::open(
            user_id,
            &self.data_dir,
            self.embedder.clone(),
            self.llm.clone(),
        )?;

        Ok(SessionGuard {
            session,
            _guard: guard,
        })
    }
}

/// A session plus the per-user lock that protects it.
pub struct SessionGuard {
    session: MemorySession,
    _guard: OwnedMutexGuard<()>,
}

impl Deref for SessionGuard {
    type Target = MemorySession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}
