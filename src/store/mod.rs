pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{RatingItem, Result};

/// Persistence seam for leaderboard snapshots.
///
/// `fetch` must return [`crate::models::RatingEngineError::SnapshotNotFound`]
/// when the key has never been saved; the pipeline treats that as the
/// bootstrap condition, not a failure. Any other error aborts the run.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    fn fetch(&self, key: &str) -> Result<Vec<RatingItem>>;

    fn save(&self, key: &str, rating: &[RatingItem]) -> Result<()>;
}
