use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::{RatingEngineError, RatingItem, Result};
use crate::store::SnapshotStore;

/// Snapshot store keeping one JSON file per leaderboard key.
///
/// The wire format is the same JSON array of rating items the production
/// key/value store holds, so payloads are interchangeable between the two.
/// A corrupt payload surfaces as a fetch failure, not as NotFound.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys may carry namespace separators ("leaderboard:weekly");
        // keep them filesystem-safe.
        let file = key.replace(['/', ':'], "_");
        self.dir.join(format!("{file}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn fetch(&self, key: &str) -> Result<Vec<RatingItem>> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RatingEngineError::SnapshotNotFound)
            }
            Err(e) => return Err(e.into()),
        };

        let rating = serde_json::from_slice(&bytes)?;
        debug!(key, path = %path.display(), "snapshot loaded");
        Ok(rating)
    }

    fn save(&self, key: &str, rating: &[RatingItem]) -> Result<()> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec(rating)?;
        fs::write(&path, bytes)?;
        debug!(key, path = %path.display(), items = rating.len(), "snapshot saved");
        Ok(())
    }
}
