use serde::{Deserialize, Serialize};

/// Transition kind for one user between two chunk assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Present now, absent from the previous snapshot.
    Entered,
    /// Present before, absent now.
    Out,
    /// Moved to a smaller-numbered (better) chunk.
    MovedUp,
    /// Moved to a larger-numbered (worse) chunk.
    MovedDown,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Entered => "entered",
            EventKind::Out => "out",
            EventKind::MovedUp => "moved_up",
            EventKind::MovedDown => "moved_down",
        }
    }
}

/// One chunk-transition event. Produced once per diff, consumed immediately
/// by the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingEvent {
    pub user_id: u32,
    pub kind: EventKind,
}

impl RatingEvent {
    pub fn new(user_id: u32, kind: EventKind) -> Self {
        Self { user_id, kind }
    }
}
