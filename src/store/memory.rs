use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::{RatingEngineError, RatingItem, Result};
use crate::store::SnapshotStore;

/// In-process snapshot store. Used by tests and the demo pipeline; the
/// production deployment points the processor at a persistent store instead.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<String, Vec<RatingItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn fetch(&self, key: &str) -> Result<Vec<RatingItem>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;

        snapshots
            .get(key)
            .cloned()
            .ok_or(RatingEngineError::SnapshotNotFound)
    }

    fn save(&self, key: &str, rating: &[RatingItem]) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;

        snapshots.insert(key.to_string(), rating.to_vec());
        Ok(())
    }
}
