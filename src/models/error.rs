use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingEngineError {
    /// Bootstrap condition: nothing has been saved under this key yet.
    /// Not a failure: the event pipeline treats it as "first run".
    #[error("rating snapshot not found")]
    SnapshotNotFound,

    #[error("cannot fetch rating: {source}")]
    FetchFailed {
        #[source]
        source: Box<RatingEngineError>,
    },

    /// The snapshot could not be persisted. Events for this run have already
    /// been delivered to the sink, so the caller must treat this as partial
    /// success and retry the save.
    #[error("cannot save rating: {source}")]
    SaveFailed {
        #[source]
        source: Box<RatingEngineError>,
    },

    #[error("cannot process events: {source}")]
    EventSinkFailed {
        #[source]
        source: Box<RatingEngineError>,
    },

    /// Ranks are 1-based; rank 0 can never fall into a chunk.
    #[error("invalid rank {0}: ranks are 1-based")]
    InvalidRank(u32),

    #[error("reward table config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RatingEngineError {
    /// True for the bootstrap sentinel, regardless of wrapping.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RatingEngineError::SnapshotNotFound)
    }
}

pub type Result<T> = std::result::Result<T, RatingEngineError>;
