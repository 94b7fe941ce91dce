pub mod pipeline;
pub mod source;
pub mod table;

pub use pipeline::{CollectingReporter, LogReporter, RewardCalculator, RewardReporter};
pub use source::{JsonTierSource, TierRow, TierSource};
pub use table::{RewardTier, RewardTierTable};
