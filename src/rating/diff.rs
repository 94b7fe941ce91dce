use crate::models::{ChunkAssignment, EventKind, RatingEvent};

/// Compares two chunk assignments and emits one transition event per user
/// whose membership changed.
///
/// For users in `current`: absent from `previous` is [`EventKind::Entered`];
/// a larger chunk id now is [`EventKind::MovedDown`] (worse tier); a smaller
/// one is [`EventKind::MovedUp`]; equal chunks emit nothing. Users only in
/// `previous` emit [`EventKind::Out`].
///
/// The batch is sorted by user id so emission order does not depend on map
/// iteration order.
pub fn diff_chunks(current: &ChunkAssignment, previous: &ChunkAssignment) -> Vec<RatingEvent> {
    let mut events = Vec::new();

    for (&user_id, &current_chunk) in current {
        match previous.get(&user_id) {
            None => events.push(RatingEvent::new(user_id, EventKind::Entered)),
            Some(&previous_chunk) => {
                if current_chunk > previous_chunk {
                    events.push(RatingEvent::new(user_id, EventKind::MovedDown));
                } else if current_chunk < previous_chunk {
                    events.push(RatingEvent::new(user_id, EventKind::MovedUp));
                }
                // equal chunks: unchanged membership, no event
            }
        }
    }

    for &user_id in previous.keys() {
        if !current.contains_key(&user_id) {
            events.push(RatingEvent::new(user_id, EventKind::Out));
        }
    }

    events.sort_by_key(|event| event.user_id);
    events
}
