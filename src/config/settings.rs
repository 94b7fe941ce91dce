use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::RankRange;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub pipeline: PipelineSettings,
    pub store: StoreSettings,
    pub rewards: RewardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Store key the leaderboard snapshot lives under.
    pub snapshot_key: String,
    /// Chunk boundaries as inclusive 1-based rank intervals, in tier order.
    pub chunks: Vec<RankRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory the JSON-file snapshot store keeps its payloads in.
    pub snapshot_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    /// JSON file the tier source reads reward rows from.
    pub tier_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "rating-engine".to_string(),
                log_level: "info".to_string(),
            },
            pipeline: PipelineSettings {
                snapshot_key: "leaderboard:weekly".to_string(),
                chunks: vec![
                    RankRange::new(1, 2),
                    RankRange::new(3, 10),
                    RankRange::new(11, 30),
                    RankRange::new(31, 50),
                ],
            },
            store: StoreSettings {
                snapshot_dir: "data/snapshots".to_string(),
            },
            rewards: RewardSettings {
                tier_file: "config/tiers.json".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RATING_ENGINE"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pipeline.snapshot_key.is_empty() {
            return Err("snapshot key must not be empty".to_string());
        }

        for range in &self.pipeline.chunks {
            if range.lower == 0 {
                return Err(format!(
                    "chunk bounds are 1-based, got lower bound 0 in {}..{}",
                    range.lower, range.upper
                ));
            }
            if range.upper < range.lower {
                return Err(format!(
                    "chunk range {}..{} is inverted",
                    range.lower, range.upper
                ));
            }
        }

        Ok(())
    }
}
