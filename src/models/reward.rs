use serde::{Deserialize, Serialize};

/// Multiplier pair attached to one reward tier. Field names match the JSON
/// payload stored in the tier source's `Data` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardFactors {
    #[serde(rename = "FactorRuby")]
    pub factor_ruby: i64,
    #[serde(rename = "FactorVIP")]
    pub factor_vip: i64,
}

impl RewardFactors {
    /// Returned for ranks no tier contains.
    pub const ZERO: RewardFactors = RewardFactors {
        factor_ruby: 0,
        factor_vip: 0,
    };

    pub fn new(factor_ruby: i64, factor_vip: i64) -> Self {
        Self {
            factor_ruby,
            factor_vip,
        }
    }
}

/// Reward lookup result for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardUser {
    pub user_id: u32,
    pub factor_ruby: i64,
    pub factor_vip: i64,
}

impl RewardUser {
    pub fn new(user_id: u32, factors: RewardFactors) -> Self {
        Self {
            user_id,
            factor_ruby: factors.factor_ruby,
            factor_vip: factors.factor_vip,
        }
    }
}
