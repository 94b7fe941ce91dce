use tracing::info;

use crate::models::{RatingItem, RewardUser};
use crate::rating::filter_rating;
use crate::rewards::RewardTierTable;

/// Human-readable sink for per-user reward results, keeping reporting
/// concerns out of the lookup loop.
pub trait RewardReporter {
    fn report(&mut self, reward: &RewardUser);
}

/// Reporter logging each reward at info level.
#[derive(Debug, Default)]
pub struct LogReporter;

impl RewardReporter for LogReporter {
    fn report(&mut self, reward: &RewardUser) {
        info!(
            user_id = reward.user_id,
            factor_ruby = reward.factor_ruby,
            factor_vip = reward.factor_vip,
            "reward computed"
        );
    }
}

/// Reporter collecting rewards into a vector; handy in tests and demos.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub rewards: Vec<RewardUser>,
}

impl RewardReporter for CollectingReporter {
    fn report(&mut self, reward: &RewardUser) {
        self.rewards.push(*reward);
    }
}

/// Computes the reward multiplier pair for every user on the board.
///
/// The table instance is owned and passed in explicitly; tier changes mean
/// constructing a new calculator, never mutating a shared one.
pub struct RewardCalculator {
    table: RewardTierTable,
}

impl RewardCalculator {
    pub fn new(table: RewardTierTable) -> Self {
        Self { table }
    }

    /// Filters the rating, then looks up each remaining user's STORED rank
    /// (unlike chunk assignment, which keys off the list position). Unmatched
    /// ranks yield the zero pair; there is no error path.
    pub fn compute_rewards<F>(
        &self,
        rating: &[RatingItem],
        exclude: F,
        reporter: &mut dyn RewardReporter,
    ) -> Vec<RewardUser>
    where
        F: Fn(&RatingItem) -> bool,
    {
        let filtered = filter_rating(rating, exclude);

        let mut rewards = Vec::with_capacity(filtered.len());
        for item in &filtered {
            let factors = self.table.get_reward(item.rank);
            let reward = RewardUser::new(item.user_id, factors);
            reporter.report(&reward);
            rewards.push(reward);
        }
        rewards
    }
}
