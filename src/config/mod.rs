pub mod settings;

pub use settings::{AppSettings, PipelineSettings, RewardSettings, Settings, StoreSettings};
