//! Text embedding provider abstraction.
//!
//! The [`Embedder`] trait converts text into fixed-dimension vectors used by
//! the memory store for similarity search. [`MockEmbedder`] produces
//! deterministic vectors so retrieval can be tested without a network.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Embedder Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for generating text embeddings.
///
/// Implementations must be deterministic within a session: the same text
/// yields the same vector. The memory store relies on this for self-matches.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation embeds sequentially; implementations may
    /// override with a batched request.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Dimensionality of the vectors this embedder produces.
    fn dimensions(&self) -> usize;

    /// Provider name, for logging.
    fn name(&self) -> &str;
}

/// A shared embedder handle.
pub type SharedEmbedder = Arc<dyn Embedder>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Embedder
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic embedder for tests.
///
/// Seeds a small PRNG from a hash of the text, so identical texts always map
/// to identical unit vectors and a query for a stored text is a distance-zero
/// self-match.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a mock embedder with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(1536)
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut state = seed_hash(text);
        let mut embedding = vec![0.0f32; self.dimensions];
        for slot in embedding.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *slot = ((state >> 33) as f32 / (u32::MAX >> 1) as f32) - 1.0;
        }

        // Unit length, so squared-L2 distances stay in a sane range.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn seed_hash(s: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_is_deterministic() {
        let embedder = MockEmbedder::new(64);
        let a = embedder.embed("the pool was lovely").await.unwrap();
        let b = embedder.embed("the pool was lovely").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn mock_distinguishes_texts() {
        let embedder = MockEmbedder::new(64);
        let a = embedder.embed("great breakfast").await.unwrap();
        let b = embedder.embed("terrible parking").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn mock_produces_unit_vectors() {
        let embedder = MockEmbedder::new(128);
        let v = embedder.embed("quiet rooms").await.unwrap();
        assert_eq!(v.len(), 128);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn batch_matches_single_calls() {
        let embedder = MockEmbedder::new(32);
        let batch = embedder.embed_batch(&["one", "two"]).await.unwrap();
        assert_eq!(batch[0], embedder.embed("one").await.unwrap());
        assert_eq!(batch[1], embedder.embed("two").await.unwrap());
    }
}
