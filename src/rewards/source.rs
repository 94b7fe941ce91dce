use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Result;

/// Raw reward-tier row as the tier source stores it. `place` is the tier's
/// inclusive upper rank bound; `data` is a JSON blob carrying the factor
/// pair, kept serialized until table construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRow {
    #[serde(rename = "Place")]
    pub place: u32,
    #[serde(rename = "Enabled", default)]
    pub enabled: bool,
    #[serde(rename = "Data")]
    pub data: String,
}

/// Source of reward-tier rows, consumed once at table-construction time.
///
/// Implementations return enabled rows only, ordered by ascending place.
#[cfg_attr(test, mockall::automock)]
pub trait TierSource {
    fn rows(&self) -> Result<Vec<TierRow>>;
}

/// Tier source reading a JSON array of rows from a file. Stands in for the
/// production SQL dictionary table; rows flagged disabled are dropped here,
/// matching that table's enabled filter.
#[derive(Debug)]
pub struct JsonTierSource {
    path: PathBuf,
}

impl JsonTierSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TierSource for JsonTierSource {
    fn rows(&self) -> Result<Vec<TierRow>> {
        let bytes = fs::read(&self.path)?;
        let mut rows: Vec<TierRow> = serde_json::from_slice(&bytes)?;

        rows.retain(|row| row.enabled);
        rows.sort_by_key(|row| row.place);
        debug!(path = %self.path.display(), rows = rows.len(), "tier rows loaded");
        Ok(rows)
    }
}
