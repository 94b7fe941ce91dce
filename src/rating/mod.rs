pub mod chunks;
pub mod diff;
pub mod filter;
pub mod pipeline;
pub mod ranker;

pub use chunks::{assign_chunks, chunk_for_rank};
pub use diff::diff_chunks;
pub use filter::filter_rating;
pub use pipeline::{EventSink, SnapshotOutcome, SnapshotProcessor};
pub use ranker::rank_scores;
