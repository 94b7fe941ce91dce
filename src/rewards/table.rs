use tracing::info;

use crate::models::{RatingEngineError, Result, RewardFactors};
use crate::rewards::source::TierSource;

/// One reward tier: a contiguous rank interval and its multiplier pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTier {
    pub lower: u32,
    pub upper: u32,
    pub factors: RewardFactors,
}

impl RewardTier {
    fn contains(&self, rank: u32) -> bool {
        rank >= self.lower && rank <= self.upper
    }
}

/// Ordered, contiguous, non-overlapping reward tiers. Immutable after
/// construction; build a fresh table to pick up tier changes.
#[derive(Debug, Clone)]
pub struct RewardTierTable {
    tiers: Vec<RewardTier>,
}

impl RewardTierTable {
    /// Builds the table from `(upper bound, factors)` rows sorted ascending
    /// by upper bound.
    ///
    /// Lower bounds are derived: the first tier starts at rank 1, every
    /// later tier right after its predecessor's upper bound. Empty input,
    /// a zero upper bound, or non-strictly-increasing bounds are rejected;
    /// a table violating the contiguity invariant must never become usable.
    pub fn from_rows(rows: &[(u32, RewardFactors)]) -> Result<Self> {
        if rows.is_empty() {
            return Err(RatingEngineError::Config("reward table is empty".into()));
        }

        let mut tiers = Vec::with_capacity(rows.len());
        let mut lower = 1u32;
        for &(upper, factors) in rows {
            if upper == 0 {
                return Err(RatingEngineError::Config(
                    "tier upper bound must be positive".into(),
                ));
            }
            if upper < lower {
                return Err(RatingEngineError::Config(format!(
                    "tier upper bounds must be strictly increasing: {upper} follows {}",
                    lower - 1
                )));
            }
            tiers.push(RewardTier {
                lower,
                upper,
                factors,
            });
            lower = upper + 1;
        }

        Ok(Self { tiers })
    }

    /// Loads and decodes rows from a tier source, then builds the table.
    pub fn load(source: &dyn TierSource) -> Result<Self> {
        let rows = source.rows()?;

        let mut decoded = Vec::with_capacity(rows.len());
        for row in &rows {
            let factors: RewardFactors = serde_json::from_str(&row.data).map_err(|e| {
                RatingEngineError::Config(format!(
                    "cannot decode tier payload for place {}: {e}",
                    row.place
                ))
            })?;
            decoded.push((row.place, factors));
        }

        let table = Self::from_rows(&decoded)?;
        info!(tiers = table.len(), "reward tier table loaded");
        Ok(table)
    }

    /// Factor pair of the unique tier whose interval contains `rank`, or the
    /// zero pair when none does.
    ///
    /// Tiers are contiguous and non-overlapping, so a binary search over the
    /// ascending upper bounds lands on the only candidate; one containment
    /// check settles it.
    pub fn get_reward(&self, rank: u32) -> RewardFactors {
        let idx = self.tiers.partition_point(|tier| tier.upper < rank);
        match self.tiers.get(idx) {
            Some(tier) if tier.contains(rank) => tier.factors,
            _ => RewardFactors::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
