//! Per-user memory session.
//!
//! A session resolves a user identifier to a snapshot path, rehydrates the
//! store from durable storage on construction, and layers the structured-note
//! and retrieval-augmented operations on top of the raw store. Durable
//! storage is the source of truth: each entry point opens a fresh session and
//! callers persist explicitly after mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use innkeep_llm::{ChatRequest, SharedEmbedder, SharedLanguageModel};
use innkeep_memory::{LoadOutcome, MemoryStore, Metadata};

use crate::error::{Result, SessionError};
use crate::prompts;

/// Default top-k for plain search.
pub const DEFAULT_SEARCH_K: usize = 5;

/// Default top-k when gathering context for answering/summarizing.
pub const DEFAULT_CONTEXT_K: usize = 10;

/// The metadata key used to correlate notes with one hotel.
const URL_KEY: &str = "hotel_url";

/// One search result, shaped for the caller-facing surface.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Stored note text.
    pub text: String,
    /// Structured attributes the note was stored with.
    pub metadata: Metadata,
    /// Labels the note was stored with.
    pub tags: Vec<String>,
    /// When the note was created.
    pub timestamp: DateTime<Utc>,
    /// Squared-L2 distance from the query (lower = closer).
    pub distance: f32,
}

/// Verbosity of a review summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStyle {
    /// One or two sentences, no lists.
    Short,
    /// Bullet points allowed.
    #[default]
    Detailed,
}

/// A generated review summary.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Hotel name discovered in the retrieved context, if any.
    pub hotel: Option<String>,
    /// The model's summary text, verbatim.
    pub answer: String,
}

/// Per-user handle over the memory store and the completion provider.
pub struct MemorySession {
    user_id: String,
    snapshot_path: PathBuf,
    store: MemoryStore,
    llm: SharedLanguageModel,
}

impl std::fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySession")
            .field("user_id", &self.user_id)
            .field("snapshot_path", &self.snapshot_path)
            .finish_non_exhaustive()
    }
}

impl MemorySession {
    /// Open a session for `user_id`, loading any existing snapshot.
    ///
    /// A missing snapshot means a fresh user and is not an error; a corrupt
    /// one is surfaced so a failed load can never masquerade as "no
    /// memories yet".
    pub fn open(
        user_id: &str,
        data_dir: &Path,
        embedder: SharedEmbedder,
        llm: SharedLanguageModel,
    ) -> Result<Self> {
        validate_user_id(user_id)?;
        std::fs::create_dir_all(data_dir)?;

        let snapshot_path = data_dir.join(format!("memory_{user_id}.json"));
        let mut store = MemoryStore::new(embedder);
        match store.load(&snapshot_path)? {
            LoadOutcome::Loaded { records } => {
                info!(user_id, records, "memory loaded");
            }
            LoadOutcome::NotFound => {
                info!(user_id, "no existing memory, starting fresh");
            }
        }

        Ok(Self {
            user_id: user_id.to_string(),
            snapshot_path,
            store,
            llm,
        })
    }

    /// The user this session belongs to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Where this session's snapshot lives.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Number of stored memories.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the session holds no memories.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Store a guest comment with its structured metadata.
    ///
    /// The metadata is rendered into a readable text block (one
    /// `Key name: value` line per entry) followed by the raw comment, and
    /// that combined text is what gets embedded.
    pub async fn add_note(
        &mut self,
        metadata: Metadata,
        comment: &str,
        tags: Vec<String>,
    ) -> Result<()> {
        let text = render_note(&metadata, comment);
        self.store.add(&text, tags, metadata).await?;
        Ok(())
    }

    /// Store pre-rendered text directly, bypassing the metadata formatting.
    /// Used by bulk import, which renders its own text.
    pub async fn add_raw(
        &mut self,
        text: &str,
        tags: Vec<String>,
        metadata: Metadata,
    ) -> Result<()> {
        self.store.add(text, tags, metadata).await?;
        Ok(())
    }

    /// Nearest-neighbor search, optionally restricted to one hotel URL.
    ///
    /// The URL filter is a pure refinement applied after retrieval: hits
    /// whose `hotel_url` metadata does not equal the filter are dropped,
    /// and the remainder keeps its distance order.
    pub async fn search(
        &self,
        query: &str,
        k: Option<usize>,
        url_filter: Option<&str>,
    ) -> Result<Vec<SearchHit>> {
        let k = k.unwrap_or(DEFAULT_SEARCH_K);
        let results = self.store.search(query, k).await?;

        let hits = results
            .into_iter()
            .filter(|(record, _)| match url_filter {
                Some(url) => record.metadata_str(URL_KEY) == Some(url),
                None => true,
            })
            .map(|(record, distance)| SearchHit {
                text: record.text,
                metadata: record.metadata,
                tags: record.tags,
                timestamp: record.timestamp,
                distance,
            })
            .collect();
        Ok(hits)
    }

    /// Answer a question from retrieved memory context. Read-only.
    pub async fn answer(
        &self,
        question: &str,
        k: Option<usize>,
        url_filter: Option<&str>,
    ) -> Result<String> {
        let hits = self
            .search(question, Some(k.unwrap_or(DEFAULT_CONTEXT_K)), url_filter)
            .await?;
        let context = prompts::bullet_context(hits.iter().map(|h| h.text.as_str()));
        let prompt = prompts::answer_prompt(&context, question);

        let answer = self
            .llm
            .complete(ChatRequest::new(prompts::SYSTEM_PROMPT, prompt))
            .await?;
        Ok(answer)
    }

    /// Summarize retrieved guest comments, discovering the hotel name from
    /// the context. Read-only.
    pub async fn summarize(
        &self,
        question: &str,
        k: Option<usize>,
        url_filter: Option<&str>,
        style: SummaryStyle,
    ) -> Result<Summary> {
        let hits = self
            .search(question, Some(k.unwrap_or(DEFAULT_CONTEXT_K)), url_filter)
            .await?;

        let hotel = hits
            .iter()
            .find_map(|h| h.metadata.get("hotel_name").and_then(|v| v.as_str()))
            .map(str::to_string);

        let context = prompts::bullet_context(hits.iter().map(|h| h.text.as_str()));
        let prompt = prompts::summary_prompt(hotel.as_deref(), &context, style);

        let answer = self
            .llm
            .complete(ChatRequest::new(prompts::SYSTEM_PROMPT, prompt))
            .await?;
        Ok(Summary { hotel, answer })
    }

    /// Draft a reply to a guest comment on behalf of the hotel. Purely
    /// derived from the inputs; no store interaction.
    pub async fn reply_to_comment(&self, metadata: &Metadata, comment: &str) -> Result<String> {
        let hotel_name = metadata
            .get("hotel_name")
            .and_then(|v| v.as_str())
            .unwrap_or("the hotel");
        let prompt = prompts::reply_prompt(hotel_name, comment);

        let reply = self
            .llm
            .complete(ChatRequest::new(prompts::SYSTEM_PROMPT, prompt))
            .await?;
        Ok(reply)
    }

    /// Persist the store to its snapshot file.
    pub fn save(&self) -> Result<()> {
        self.store.persist(&self.snapshot_path)?;
        Ok(())
    }

    /// Clear all memories and delete the snapshot file. Idempotent.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset(&self.snapshot_path)?;
        Ok(())
    }
}

/// User ids become file names; restrict them to a safe alphabet.
fn validate_user_id(user_id: &str) -> Result<()> {
    let ok = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(SessionError::InvalidUserId(user_id.to_string()))
    }
}

/// Render metadata as `Key name: value` lines followed by the comment.
fn render_note(metadata: &Metadata, comment: &str) -> String {
    let mut lines: Vec<String> = metadata
        .iter()
        .map(|(key, value)| format!("{}: {}", title_case(key), scalar_to_string(value)))
        .collect();
    lines.push(format!("Comment: {comment}"));
    lines.join("\n")
}

/// `hotel_name` → `Hotel name`.
fn title_case(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// Scalars render bare; anything else falls back to JSON.
fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep_llm::{MockEmbedder, MockModel};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn providers() -> (SharedEmbedder, Arc<MockModel>) {
        (
            Arc::new(MockEmbedder::new(64)),
            Arc::new(MockModel::new(vec![String::from("canned answer"); 8])),
        )
    }

    fn hotel_meta(name: &str, url: &str) -> Metadata {
        let mut m = Metadata::new();
        m.insert("hotel_name".into(), name.into());
        m.insert("hotel_url".into(), url.into());
        m
    }

    #[tokio::test]
    async fn open_fresh_user_is_empty() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();
        let session = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap();
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn invalid_user_id_rejected() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();
        let err = MemorySession::open("../../etc", dir.path(), embedder, llm).unwrap_err();
        assert!(matches!(err, SessionError::InvalidUserId(_)));
    }

    #[tokio::test]
    async fn corrupt_snapshot_fails_open() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("memory_guest1.json"), b"garbage").unwrap();

        let (embedder, llm) = providers();
        let err = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Memory(innkeep_memory::MemoryError::SnapshotCorrupt { .. })
        ));
    }

    #[tokio::test]
    async fn note_renders_metadata_block() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();
        let mut session = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap();

        session
            .add_note(hotel_meta("Acme Inn", "acme.com"), "Great stay", vec![])
            .await
            .unwrap();

        let hits = session.search("Great stay", None, None).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("Hotel name: Acme Inn"));
        assert!(hits[0].text.contains("Hotel url: acme.com"));
        assert!(hits[0].text.contains("Comment: Great stay"));
    }

    #[tokio::test]
    async fn url_filter_keeps_matching_subset_in_order() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();
        let mut session = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap();

        session
            .add_raw("nice pool", vec![], hotel_meta("A", "a"))
            .await
            .unwrap();
        session
            .add_raw("good breakfast", vec![], hotel_meta("B", "b"))
            .await
            .unwrap();
        session
            .add_raw("thin walls", vec![], hotel_meta("A2", "a"))
            .await
            .unwrap();
        session
            .add_raw("no url note", vec![], Metadata::new())
            .await
            .unwrap();

        let hits = session.search("pool", Some(10), Some("a")).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.metadata["hotel_url"] == "a"));
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[tokio::test]
    async fn answer_composes_bullet_context() {
        let dir = TempDir::new().unwrap();
        let embedder: SharedEmbedder = Arc::new(MockEmbedder::new(64));
        let llm = Arc::new(MockModel::with_text("mostly positive"));
        let mut session =
            MemorySession::open("guest1", dir.path(), embedder, llm.clone()).unwrap();

        session
            .add_raw("spotless rooms", vec![], Metadata::new())
            .await
            .unwrap();

        let answer = session.answer("how clean is it", None, None).await.unwrap();
        assert_eq!(answer, "mostly positive");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("- spotless rooms"));
        assert!(requests[0].prompt.contains("Question: how clean is it"));
    }

    #[tokio::test]
    async fn summarize_discovers_hotel_name() {
        let dir = TempDir::new().unwrap();
        let embedder: SharedEmbedder = Arc::new(MockEmbedder::new(64));
        let llm = Arc::new(MockModel::with_text("summary"));
        let mut session =
            MemorySession::open("guest1", dir.path(), embedder, llm.clone()).unwrap();

        session
            .add_raw("lovely lobby", vec![], hotel_meta("Acme Inn", "acme.com"))
            .await
            .unwrap();

        let summary = session
            .summarize("what do guests say", None, None, SummaryStyle::Short)
            .await
            .unwrap();
        assert_eq!(summary.hotel.as_deref(), Some("Acme Inn"));
        assert!(llm.requests()[0].prompt.contains("Hotel name: Acme Inn"));
    }

    #[tokio::test]
    async fn reply_uses_hotel_persona_without_touching_store() {
        let dir = TempDir::new().unwrap();
        let embedder: SharedEmbedder = Arc::new(MockEmbedder::new(64));
        let llm = Arc::new(MockModel::with_text("thank you!"));
        let session = MemorySession::open("guest1", dir.path(), embedder, llm.clone()).unwrap();

        let reply = session
            .reply_to_comment(&hotel_meta("Acme Inn", "acme.com"), "Great stay")
            .await
            .unwrap();
        assert_eq!(reply, "thank you!");
        assert!(session.is_empty());
        assert!(llm.requests()[0].prompt.contains("Acme Inn"));
    }

    #[tokio::test]
    async fn save_then_reopen_round_trips() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();

        {
            let mut session =
                MemorySession::open("guest1", dir.path(), embedder.clone(), llm.clone()).unwrap();
            session
                .add_note(hotel_meta("Acme Inn", "acme.com"), "Great stay", vec![
                    "positive".into(),
                ])
                .await
                .unwrap();
            session.save().unwrap();
        }

        let session = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap();
        assert_eq!(session.len(), 1);
        let hits = session.search("Great stay", None, None).await.unwrap();
        assert_eq!(hits[0].tags, vec!["positive".to_string()]);
        assert!(hits[0].distance < 1e-6);
    }

    #[tokio::test]
    async fn reset_twice_never_errors() {
        let dir = TempDir::new().unwrap();
        let (embedder, llm) = providers();
        let mut session = MemorySession::open("guest1", dir.path(), embedder, llm).unwrap();

        session
            .add_raw("temporary", vec![], Metadata::new())
            .await
            .unwrap();
        session.save().unwrap();

        session.reset().unwrap();
        assert!(session.is_empty());
        session.reset().unwrap();
        assert!(session.is_empty());
    }
}
