//! The sorted, non-empty snapshot sequence.

use crate::source::Snapshot;

/// Census snapshots ordered by timestamp.
///
/// Construction sorts the records (stable, so equal timestamps keep their
/// input order) and refuses an empty sequence, which lets every consumer
/// rely on [`Census::latest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Census {
    snapshots: Vec<Snapshot>,
}

impl Census {
    /// Sort the snapshots by timestamp. Returns `None` if there are none.
    pub fn new(mut snapshots: Vec<Snapshot>) -> Option<Self> {
        if snapshots.is_empty() {
            return None;
        }
        snapshots.sort_by_key(|s| s.timestamp);
        Some(Self { snapshots })
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> &Snapshot {
        // Non-empty by construction
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false for a constructed census.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
