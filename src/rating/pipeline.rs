use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{RankRange, RatingEngineError, RatingEvent, RatingItem, Result};
use crate::rating::{assign_chunks, diff_chunks, filter_rating};
use crate::store::SnapshotStore;

/// Receives the full event batch for one snapshot, at most once per run.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn publish(&self, events: &[RatingEvent]) -> Result<()>;
}

/// What a pipeline run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// First run for this key: the filtered rating was saved, nothing was
    /// diffed and the sink was not called.
    Bootstrapped,
    /// A previous snapshot existed; this many events went to the sink.
    Diffed { events: usize },
}

/// Sequences one leaderboard refresh: filter the rating, fetch the previous
/// snapshot, diff, publish the events, save.
pub struct SnapshotProcessor {
    store: Arc<dyn SnapshotStore>,
    sink: Arc<dyn EventSink>,
    chunks: Vec<RankRange>,
}

impl SnapshotProcessor {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        sink: Arc<dyn EventSink>,
        chunks: Vec<RankRange>,
    ) -> Self {
        Self {
            store,
            sink,
            chunks,
        }
    }

    /// Runs the event pipeline for one snapshot of the leaderboard stored
    /// under `key`.
    ///
    /// The first run for a key saves the filtered rating and returns
    /// [`SnapshotOutcome::Bootstrapped`] without diffing. Any other fetch
    /// error aborts before anything is saved.
    ///
    /// The snapshot is persisted whether or not the sink accepts the batch.
    /// A save failure is returned with precedence (the stored snapshot is
    /// now stale and the caller must retry); otherwise a sink failure is
    /// returned as `EventSinkFailed`. Events reach the sink sorted by
    /// user id.
    pub fn process_snapshot<F>(
        &self,
        key: &str,
        current: &[RatingItem],
        exclude: F,
    ) -> Result<SnapshotOutcome>
    where
        F: Fn(&RatingItem) -> bool,
    {
        let filtered = filter_rating(current, exclude);
        debug!(key, kept = filtered.len(), dropped = current.len() - filtered.len(), "rating filtered");

        let previous = match self.store.fetch(key) {
            Ok(previous) => previous,
            Err(RatingEngineError::SnapshotNotFound) => {
                info!(key, "no previous rating, bootstrapping");
                self.save(key, &filtered)?;
                return Ok(SnapshotOutcome::Bootstrapped);
            }
            Err(e) => {
                return Err(RatingEngineError::FetchFailed {
                    source: Box::new(e),
                })
            }
        };

        let events = diff_chunks(
            &assign_chunks(&filtered, &self.chunks)?,
            &assign_chunks(&previous, &self.chunks)?,
        );
        info!(key, events = events.len(), "rating diff complete");

        let published = self.sink.publish(&events);
        self.save(key, &filtered)?;
        published.map_err(|e| RatingEngineError::EventSinkFailed {
            source: Box::new(e),
        })?;

        Ok(SnapshotOutcome::Diffed {
            events: events.len(),
        })
    }

    fn save(&self, key: &str, rating: &[RatingItem]) -> Result<()> {
        self.store.save(key, rating).map_err(|e| RatingEngineError::SaveFailed {
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;
    use crate::store::MockSnapshotStore;
    use mockall::predicate::eq;

    fn chunks() -> Vec<RankRange> {
        [(1, 2), (3, 10), (11, 30), (31, 50)]
            .into_iter()
            .map(RankRange::from)
            .collect()
    }

    fn sample_rating() -> Vec<RatingItem> {
        vec![
            RatingItem::new(1, 1, 100),
            RatingItem::new(10, 2, 50),
            RatingItem::new(25, 3, 10),
        ]
    }

    fn sink_expecting(expected: Vec<RatingEvent>) -> MockEventSink {
        let mut sink = MockEventSink::new();
        sink.expect_publish()
            .times(1)
            .withf(move |events| events == expected)
            .returning(|_| Ok(()));
        sink
    }

    #[test]
    fn bootstrap_saves_filtered_rating_without_publishing() {
        let rating = sample_rating();

        let expected_saved = rating.clone();
        let mut store = MockSnapshotStore::new();
        store
            .expect_fetch()
            .with(eq("weekly"))
            .returning(|_| Err(RatingEngineError::SnapshotNotFound));
        store
            .expect_save()
            .times(1)
            .withf(move |key, saved| key == "weekly" && saved == expected_saved)
            .returning(|_, _| Ok(()));

        let mut sink = MockEventSink::new();
        sink.expect_publish().never();

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let outcome = processor.process_snapshot("weekly", &rating, |_| false).unwrap();

        assert_eq!(outcome, SnapshotOutcome::Bootstrapped);
    }

    #[test]
    fn fetch_failure_aborts_without_saving() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_fetch()
            .returning(|_| Err(anyhow::anyhow!("store unreachable").into()));
        store.expect_save().never();

        let mut sink = MockEventSink::new();
        sink.expect_publish().never();

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let err = processor
            .process_snapshot("weekly", &sample_rating(), |_| false)
            .unwrap_err();

        assert!(matches!(err, RatingEngineError::FetchFailed { .. }));
    }

    #[test]
    fn filtered_user_goes_out_and_the_rest_shift_up() {
        let rating = sample_rating();
        let previous = rating.clone();
        let expected_saved = vec![RatingItem::new(1, 1, 100), RatingItem::new(25, 3, 10)];

        let mut store = MockSnapshotStore::new();
        store.expect_fetch().returning(move |_| Ok(previous.clone()));
        store
            .expect_save()
            .times(1)
            .withf(move |key, saved| key == "weekly" && saved == expected_saved)
            .returning(|_, _| Ok(()));

        // User 10 is filtered out of current; user 25 moves from position 3
        // (chunk 2) to position 2 (chunk 1).
        let sink = sink_expecting(vec![
            RatingEvent::new(10, EventKind::Out),
            RatingEvent::new(25, EventKind::MovedUp),
        ]);

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let outcome = processor
            .process_snapshot("weekly", &rating, |item| item.user_id == 10)
            .unwrap();

        assert_eq!(outcome, SnapshotOutcome::Diffed { events: 2 });
    }

    #[test]
    fn unchanged_rating_produces_no_events() {
        let rating = sample_rating();
        let previous = rating.clone();

        let expected_saved = rating.clone();
        let mut store = MockSnapshotStore::new();
        store.expect_fetch().returning(move |_| Ok(previous.clone()));
        store
            .expect_save()
            .times(1)
            .withf(move |key, saved| key == "weekly" && saved == expected_saved)
            .returning(|_, _| Ok(()));

        let sink = sink_expecting(Vec::new());

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let outcome = processor.process_snapshot("weekly", &rating, |_| false).unwrap();

        assert_eq!(outcome, SnapshotOutcome::Diffed { events: 0 });
    }

    #[test]
    fn sink_failure_does_not_skip_the_save() {
        let rating = sample_rating();
        let previous = rating.clone();

        let mut store = MockSnapshotStore::new();
        store.expect_fetch().returning(move |_| Ok(previous.clone()));
        store.expect_save().times(1).returning(|_, _| Ok(()));

        let mut sink = MockEventSink::new();
        sink.expect_publish()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("downstream rejected batch").into()));

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let err = processor
            .process_snapshot("weekly", &rating, |_| false)
            .unwrap_err();

        assert!(matches!(err, RatingEngineError::EventSinkFailed { .. }));
    }

    #[test]
    fn save_failure_takes_precedence_over_sink_failure() {
        let rating = sample_rating();
        let previous = rating.clone();

        let mut store = MockSnapshotStore::new();
        store.expect_fetch().returning(move |_| Ok(previous.clone()));
        store
            .expect_save()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("disk full").into()));

        let mut sink = MockEventSink::new();
        sink.expect_publish()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("downstream rejected batch").into()));

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let err = processor
            .process_snapshot("weekly", &rating, |_| false)
            .unwrap_err();

        assert!(matches!(err, RatingEngineError::SaveFailed { .. }));
    }

    #[test]
    fn bootstrap_save_failure_surfaces_as_save_failed() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_fetch()
            .returning(|_| Err(RatingEngineError::SnapshotNotFound));
        store
            .expect_save()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("disk full").into()));

        let mut sink = MockEventSink::new();
        sink.expect_publish().never();

        let processor = SnapshotProcessor::new(Arc::new(store), Arc::new(sink), chunks());
        let err = processor
            .process_snapshot("weekly", &sample_rating(), |_| false)
            .unwrap_err();

        assert!(matches!(err, RatingEngineError::SaveFailed { .. }));
    }
}
