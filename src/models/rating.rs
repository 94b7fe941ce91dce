use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a leaderboard snapshot. Field names follow the wire format the
/// snapshot store persists (JSON produced by the upstream rating service).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingItem {
    #[serde(rename = "UserID")]
    pub user_id: u32,
    /// 1-based position on the board, unique within a snapshot.
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Value")]
    pub value: i64,
}

impl RatingItem {
    pub fn new(user_id: u32, rank: u32, value: i64) -> Self {
        Self {
            user_id,
            rank,
            value,
        }
    }
}

/// Raw, unranked score as produced by the play-count aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScore {
    #[serde(rename = "UserID")]
    pub user_id: u32,
    #[serde(rename = "Value")]
    pub value: i64,
}

/// Inclusive 1-based rank interval defining one chunk (reward/visibility
/// tier bucket) boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    pub lower: u32,
    pub upper: u32,
}

impl RankRange {
    pub fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, rank: u32) -> bool {
        rank >= self.lower && rank <= self.upper
    }
}

impl From<(u32, u32)> for RankRange {
    fn from((lower, upper): (u32, u32)) -> Self {
        Self { lower, upper }
    }
}

/// 1-based index into the caller-supplied chunk range list, or
/// [`UNASSIGNED_CHUNK`] when a rank falls into none of the ranges.
pub type ChunkId = i32;

/// Sentinel chunk id for ranks outside every defined range. It compares
/// below every real chunk id, so leaving all defined ranges while staying on
/// the board diffs as an upward move.
pub const UNASSIGNED_CHUNK: ChunkId = -1;

/// Per-snapshot mapping from user id to chunk id. Built fresh on every
/// pipeline run; keys are unique because ranks are unique.
pub type ChunkAssignment = HashMap<u32, ChunkId>;
