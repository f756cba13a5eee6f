//! Record types stored in the memory log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied structured attributes attached to a record.
///
/// No keys are required at the store layer; the session layer reads
/// `hotel_name` and `hotel_url` when present.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One stored note: the canonical text plus its structured context.
///
/// Records are append-only and immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Canonical content, used for display and for embedding.
    pub text: String,

    /// Creation time, immutable thereafter.
    pub timestamp: DateTime<Utc>,

    /// Caller-supplied labels; may be empty.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Caller-supplied structured attributes.
    #[serde(default)]
    pub metadata: Metadata,
}

impl MemoryRecord {
    /// Create a record stamped with the current time.
    pub fn new(text: impl Into<String>, tags: Vec<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
            tags,
            metadata,
        }
    }

    /// Look up a metadata value as a string, if present and string-typed.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}
