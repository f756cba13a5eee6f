//! In-memory flat vector index with squared-L2 nearest-neighbor search.
//!
//! Positions in the index are implicit insertion order; the store keeps them
//! aligned with the record log. The index is append/reset only — there is no
//! removal by position.

use crate::error::{MemoryError, Result};

/// Flat vector index over a fixed dimensionality.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dims: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            vectors: Vec::new(),
        }
    }

    /// Dimensionality this index accepts.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector, assigning it the next position.
    ///
    /// A vector of the wrong length is rejected and the index is left
    /// unchanged.
    pub fn append(&mut self, vector: Vec<f32>) -> Result<()> {
        self.check_dims(&vector)?;
        self.vectors.push(vector);
        Ok(())
    }

    /// Return up to `k` positions ordered by ascending squared-L2 distance
    /// from the query vector.
    ///
    /// An empty index yields an empty result, not an error.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        self.check_dims(vector)?;

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(pos, stored)| (pos, squared_l2(vector, stored)))
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    /// Drop all vectors. Used only by the full-store reset.
    pub fn reset(&mut self) {
        self.vectors.clear();
    }

    /// Borrow the stored vectors in position order.
    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    fn check_dims(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dims {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dims,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_orders_by_distance() {
        let mut index = VectorIndex::new(2);
        index.append(vec![0.0, 0.0]).unwrap();
        index.append(vec![3.0, 4.0]).unwrap();
        index.append(vec![1.0, 0.0]).unwrap();

        let results = index.query(&[0.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (0, 0.0));
        assert_eq!(results[1], (2, 1.0));
        assert_eq!(results[2], (1, 25.0));
    }

    #[test]
    fn query_truncates_to_k() {
        let mut index = VectorIndex::new(1);
        for i in 0..5 {
            index.append(vec![i as f32]).unwrap();
        }
        let results = index.query(&[0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn query_empty_index_is_empty() {
        let index = VectorIndex::new(3);
        assert!(index.query(&[0.0, 0.0, 0.0], 5).unwrap().is_empty());
    }

    #[test]
    fn append_rejects_wrong_dimension() {
        let mut index = VectorIndex::new(1536);
        let err = index.append(vec![0.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            MemoryError::DimensionMismatch {
                expected: 1536,
                actual: 10
            }
        ));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn reset_drops_everything() {
        let mut index = VectorIndex::new(1);
        index.append(vec![1.0]).unwrap();
        index.reset();
        assert!(index.is_empty());
    }
}
