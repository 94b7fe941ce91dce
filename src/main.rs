use clap::{Parser, Subcommand};
use rating_engine::{
    config::Settings,
    models::{RatingEvent, RatingItem, RawScore},
    rating::{rank_scores, EventSink, SnapshotOutcome, SnapshotProcessor},
    rewards::{CollectingReporter, JsonTierSource, RewardCalculator, RewardTierTable},
    store::JsonFileStore,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[clap(name = "rating-engine")]
#[clap(about = "Diff leaderboard snapshots into tier events and compute rank rewards", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random sample leaderboard file
    Gen {
        /// Number of users on the board
        #[clap(short, long, default_value = "50")]
        users: u32,

        /// Output file for the ranked rating (JSON)
        #[clap(short, long, default_value = "rating.json")]
        out: PathBuf,
    },

    /// Rank a raw score file into a rating list
    Rank {
        /// Input file with raw {UserID, Value} scores (JSON)
        #[clap(short, long)]
        scores: PathBuf,

        /// Output file for the ranked rating (JSON); prints when omitted
        #[clap(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the event pipeline: diff a rating against the saved snapshot
    Events {
        /// Current rating file (JSON)
        #[clap(short, long)]
        rating: PathBuf,

        /// Snapshot key; defaults to the configured one
        #[clap(short, long)]
        key: Option<String>,

        /// User ids to exclude from the rating
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<u32>,
    },

    /// Compute reward multipliers for every user on the board
    Rewards {
        /// Current rating file (JSON)
        #[clap(short, long)]
        rating: PathBuf,

        /// Tier table file; defaults to the configured one
        #[clap(short, long)]
        tiers: Option<PathBuf>,

        /// User ids to exclude from the rating
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<u32>,
    },
}

/// Prints each event of the batch; the CLI stands in for the downstream
/// notification service.
struct StdoutSink;

impl EventSink for StdoutSink {
    fn publish(&self, events: &[RatingEvent]) -> rating_engine::Result<()> {
        for event in events {
            println!("user {:>10}  {}", event.user_id, event.kind.as_str());
        }
        Ok(())
    }
}

fn load_rating(path: &PathBuf) -> anyhow::Result<Vec<RatingItem>> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    // Validate settings
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    match cli.command {
        Commands::Gen { users, out } => {
            use rand::Rng;

            let mut rng = rand::thread_rng();
            let scores: Vec<RawScore> = (0..users)
                .map(|i| RawScore {
                    user_id: i + 1,
                    value: rng.gen_range(0..100_000),
                })
                .collect();

            let rating = rank_scores(scores);
            fs::write(&out, serde_json::to_vec_pretty(&rating)?)?;
            println!("Wrote {} ranked users to {}", rating.len(), out.display());
        }

        Commands::Rank { scores, out } => {
            let bytes = fs::read(&scores)?;
            let raw: Vec<RawScore> = serde_json::from_slice(&bytes)?;
            let rating = rank_scores(raw);

            match out {
                Some(out) => {
                    fs::write(&out, serde_json::to_vec_pretty(&rating)?)?;
                    println!("Wrote {} ranked users to {}", rating.len(), out.display());
                }
                None => {
                    for item in &rating {
                        println!("#{:<6} user {:>10}  value {}", item.rank, item.user_id, item.value);
                    }
                }
            }
        }

        Commands::Events {
            rating,
            key,
            exclude,
        } => {
            let current = load_rating(&rating)?;
            let key = key.unwrap_or(settings.pipeline.snapshot_key);

            let store = Arc::new(JsonFileStore::open(&settings.store.snapshot_dir)?);
            let processor =
                SnapshotProcessor::new(store, Arc::new(StdoutSink), settings.pipeline.chunks);

            let outcome =
                processor.process_snapshot(&key, &current, |item| exclude.contains(&item.user_id));

            match outcome {
                Ok(SnapshotOutcome::Bootstrapped) => {
                    println!("First snapshot for '{key}' saved; nothing to diff yet.");
                }
                Ok(SnapshotOutcome::Diffed { events }) => {
                    println!("{events} event(s) for '{key}'.");
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Rewards {
            rating,
            tiers,
            exclude,
        } => {
            let current = load_rating(&rating)?;
            let tier_file = tiers.unwrap_or_else(|| PathBuf::from(&settings.rewards.tier_file));

            let source = JsonTierSource::new(&tier_file);
            let table = RewardTierTable::load(&source)?;
            let calculator = RewardCalculator::new(table);

            let mut reporter = CollectingReporter::default();
            calculator.compute_rewards(
                &current,
                |item| exclude.contains(&item.user_id),
                &mut reporter,
            );

            println!("\n=== Rank Rewards ===");
            for reward in &reporter.rewards {
                println!(
                    "user {:>10}  ruby x{:<6} vip x{}",
                    reward.user_id, reward.factor_ruby, reward.factor_vip
                );
            }
        }
    }

    Ok(())
}
