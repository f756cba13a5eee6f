//! Durable snapshot serialization.
//!
//! One JSON file per user holding the record log and its aligned vectors.
//! Writes go through a sibling temp file and an atomic rename so a failure
//! partway through never leaves a truncated file that would parse as a
//! present-but-shorter store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{MemoryError, Result};
use crate::types::MemoryRecord;

/// The persisted form of a memory store: equal-length, order-aligned pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Records in log order.
    pub records: Vec<MemoryRecord>,
    /// Embedding vectors, position-aligned with `records`.
    pub vectors: Vec<Vec<f32>>,
}

/// Write a snapshot atomically.
///
/// The parent directory must already exist.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let bytes = serde_json::to_vec(snapshot)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), records = snapshot.records.len(), "wrote snapshot");
    Ok(())
}

/// Read a snapshot, if one exists.
///
/// Returns `Ok(None)` when the file is missing (a fresh user, not an error).
/// A file that exists but does not parse into an aligned pair of the
/// expected dimensionality is reported as corrupt rather than silently
/// loaded partially.
pub fn read_snapshot(path: &Path, dims: usize) -> Result<Option<Snapshot>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| MemoryError::SnapshotCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if snapshot.records.len() != snapshot.vectors.len() {
        return Err(MemoryError::SnapshotCorrupt {
            path: path.to_path_buf(),
            reason: format!(
                "{} records but {} vectors",
                snapshot.records.len(),
                snapshot.vectors.len()
            ),
        });
    }

    if let Some(bad) = snapshot.vectors.iter().position(|v| v.len() != dims) {
        return Err(MemoryError::SnapshotCorrupt {
            path: path.to_path_buf(),
            reason: format!(
                "vector at position {bad} has {} dimensions, expected {dims}",
                snapshot.vectors[bad].len()
            ),
        });
    }

    Ok(Some(snapshot))
}

/// Delete a snapshot file. Deleting a nonexistent file is a no-op.
pub fn delete_snapshot(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "deleted snapshot");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        Snapshot {
            records: vec![MemoryRecord::new("hello", vec![], Metadata::new())],
            vectors: vec![vec![0.5, 0.5]],
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory_u1.json");

        write_snapshot(&path, &sample()).unwrap();
        let loaded = read_snapshot(&path, 2).unwrap().unwrap();

        assert_eq!(loaded.records[0].text, "hello");
        assert_eq!(loaded.vectors, vec![vec![0.5, 0.5]]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = read_snapshot(&dir.path().join("absent.json"), 2).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory_u1.json");
        fs::write(&path, b"not json at all").unwrap();

        let err = read_snapshot(&path, 2).unwrap_err();
        assert!(matches!(err, MemoryError::SnapshotCorrupt { .. }));
    }

    #[test]
    fn misaligned_pair_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory_u1.json");
        fs::write(
            &path,
            br#"{"records":[],"vectors":[[1.0,0.0]]}"#,
        )
        .unwrap();

        let err = read_snapshot(&path, 2).unwrap_err();
        assert!(matches!(err, MemoryError::SnapshotCorrupt { .. }));
    }

    #[test]
    fn wrong_dimension_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory_u1.json");
        write_snapshot(&path, &sample()).unwrap();

        let err = read_snapshot(&path, 3).unwrap_err();
        assert!(matches!(err, MemoryError::SnapshotCorrupt { .. }));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory_u1.json");
        write_snapshot(&path, &sample()).unwrap();

        delete_snapshot(&path).unwrap();
        delete_snapshot(&path).unwrap();
        assert!(!path.exists());
    }
}
