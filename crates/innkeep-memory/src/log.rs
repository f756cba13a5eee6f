//! Ordered, in-memory record log.
//!
//! Log order is insertion order; a record's position doubles as its identity
//! and lines up with the same position in the vector index.

use crate::types::MemoryRecord;

/// Append-only sequence of memory records.
#[derive(Debug, Clone, Default)]
pub struct RecordLog {
    records: Vec<MemoryRecord>,
}

impl RecordLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning its position (the previous length).
    pub fn append(&mut self, record: MemoryRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Get the record at a position.
    pub fn get(&self, position: usize) -> Option<&MemoryRecord> {
        self.records.get(position)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterate records in position order.
    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    #[test]
    fn append_returns_positions_in_order() {
        let mut log = RecordLog::new();
        let a = log.append(MemoryRecord::new("a", vec![], Metadata::new()));
        let b = log.append(MemoryRecord::new("b", vec![], Metadata::new()));
        assert_eq!((a, b), (0, 1));
        assert_eq!(log.get(1).unwrap().text, "b");
        assert!(log.get(2).is_none());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = RecordLog::new();
        log.append(MemoryRecord::new("a", vec![], Metadata::new()));
        log.clear();
        assert!(log.is_empty());
    }
}
