// Latest-reading store.
//
// A watch channel holding the most recent applied sample. The apply rule is
// latest-issued-wins: a completion whose sequence number is not newer than
// the applied sample's is dropped, so overlapping in-flight requests cannot
// roll the display back to a stale reading.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use sensorium_api::Reading;

/// One decoded reading plus the bookkeeping needed for ordering.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Sequence number of the request that produced this reading.
    /// Assigned at issue time, strictly increasing.
    pub seq: u64,
    /// The decoded reading.
    pub reading: Arc<Reading>,
    /// When the response was received.
    pub received_at: DateTime<Utc>,
}

impl Sample {
    pub fn new(seq: u64, reading: Reading) -> Self {
        Self {
            seq,
            reading: Arc::new(reading),
            received_at: Utc::now(),
        }
    }
}

/// Reactive holder of the most recent sample.
#[derive(Debug)]
pub struct ReadingStore {
    latest: watch::Sender<Option<Arc<Sample>>>,
}

impl ReadingStore {
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self { latest }
    }

    /// Subscribe to sample updates. The receiver immediately sees the
    /// current value (`None` until the first successful tick).
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Sample>>> {
        self.latest.subscribe()
    }

    /// The currently applied sample, if any.
    pub fn current(&self) -> Option<Arc<Sample>> {
        self.latest.borrow().clone()
    }

    /// Apply a completed sample. Returns `false` if the sample was stale
    /// (a sample from a later request is already applied) and was dropped.
    pub fn apply(&self, sample: Sample) -> bool {
        self.latest.send_if_modified(|current| {
            let newer = current.as_ref().is_none_or(|applied| sample.seq > applied.seq);
            if newer {
                *current = Some(Arc::new(sample));
            }
            newer
        })
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use sensorium_api::WaterLevel;

    use super::*;

    fn reading(temperature: f64) -> Reading {
        Reading {
            temperature,
            humidity: 50.0,
            air_quality: 100.0,
            water_level: WaterLevel::Low,
        }
    }

    #[test]
    fn first_sample_is_applied() {
        let store = ReadingStore::new();
        assert!(store.current().is_none());

        assert!(store.apply(Sample::new(1, reading(20.0))));
        let current = store.current().expect("sample applied");
        assert_eq!(current.seq, 1);
        assert_eq!(current.reading.temperature, 20.0);
    }

    #[test]
    fn newer_sample_replaces_older() {
        let store = ReadingStore::new();
        assert!(store.apply(Sample::new(1, reading(20.0))));
        assert!(store.apply(Sample::new(2, reading(21.0))));

        let current = store.current().expect("sample applied");
        assert_eq!(current.seq, 2);
        assert_eq!(current.reading.temperature, 21.0);
    }

    #[test]
    fn stale_completion_is_dropped() {
        // Request 2 resolved before request 1: applying 1 afterwards must
        // not roll the display back.
        let store = ReadingStore::new();
        assert!(store.apply(Sample::new(2, reading(21.0))));
        assert!(!store.apply(Sample::new(1, reading(20.0))));

        let current = store.current().expect("sample applied");
        assert_eq!(current.seq, 2);
        assert_eq!(current.reading.temperature, 21.0);
    }

    #[test]
    fn subscribers_are_notified_only_on_apply() {
        let store = ReadingStore::new();
        let mut rx = store.subscribe();

        // Initial value is None and not marked changed after borrow
        assert!(rx.borrow_and_update().is_none());

        store.apply(Sample::new(1, reading(20.0)));
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|s| s.seq),
            Some(1)
        );

        // A dropped stale sample wakes nobody
        store.apply(Sample::new(0, reading(19.0)));
        assert!(!rx.has_changed().expect("sender alive"));
    }
}
