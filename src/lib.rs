pub mod config;
pub mod models;
pub mod rating;
pub mod rewards;
pub mod store;

pub use models::{
    ChunkAssignment, ChunkId, EventKind, RankRange, RatingEngineError, RatingEvent, RatingItem,
    RawScore, Result, RewardFactors, RewardUser, UNASSIGNED_CHUNK,
};
pub use config::Settings;

// Re-export the two orchestration entry points
pub use rating::{SnapshotOutcome, SnapshotProcessor};
pub use rewards::{RewardCalculator, RewardTierTable};
