//! The repeating poll loop.
//!
//! One background task owns the timer; each tick spawns an independent fetch
//! task so a slow station cannot delay the cadence. Failures are terminal to
//! their tick only.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use sensorium_api::{Error, StationClient, TransportConfig};

use crate::store::{ReadingStore, Sample};

/// Explicit poller configuration -- no implicit globals.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// The station's data endpoint (scheme, host, port, path).
    pub endpoint: Url,
    /// Poll cadence. Must be positive (enforced by `sensorium-config`).
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Health of the poll loop as observed from the latest completions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PollHealth {
    /// No tick has completed yet.
    #[default]
    NoData,
    /// The most recent applied tick succeeded.
    Live,
    /// The most recent tick failed; polling continues.
    Failing { error: String },
}

/// Owns the repeating timer and publishes readings through a watch channel.
///
/// The poller has a single state, polling, from [`spawn`](Self::spawn) until
/// [`stop`](Self::stop) or drop. A failed tick is logged and skipped; it
/// never affects subsequent scheduling.
pub struct Poller {
    client: StationClient,
    interval: Duration,
    store: Arc<ReadingStore>,
    health: watch::Sender<PollHealth>,
    seq: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl Poller {
    /// Build a poller from its config.
    pub fn new(config: &PollerConfig) -> Result<Self, Error> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = StationClient::new(config.endpoint.clone(), &transport)?;
        Ok(Self::from_client(client, config.interval))
    }

    /// Build a poller around an existing client (used by tests).
    pub fn from_client(client: StationClient, interval: Duration) -> Self {
        let (health, _) = watch::channel(PollHealth::default());
        Self {
            client,
            interval,
            store: Arc::new(ReadingStore::new()),
            health,
            seq: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to applied samples.
    pub fn readings(&self) -> watch::Receiver<Option<Arc<Sample>>> {
        self.store.subscribe()
    }

    /// Subscribe to poll health transitions.
    pub fn health(&self) -> watch::Receiver<PollHealth> {
        self.health.subscribe()
    }

    /// The store holding the most recent applied sample.
    pub fn store(&self) -> &Arc<ReadingStore> {
        &self.store
    }

    /// Start polling: one request immediately, then one per interval.
    pub fn spawn(&self) {
        let client = self.client.clone();
        let store = Arc::clone(&self.store);
        let health = self.health.clone();
        let seq = Arc::clone(&self.seq);
        let interval = self.interval;
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Don't burst ticks if we fall behind
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,

                    _ = ticker.tick() => {
                        let seq = seq.fetch_add(1, Ordering::Relaxed) + 1;
                        // In-flight requests are independent: tick N+1 fires
                        // whether or not tick N has completed.
                        tokio::spawn(run_tick(
                            seq,
                            client.clone(),
                            Arc::clone(&store),
                            health.clone(),
                        ));
                    }
                }
            }

            debug!("poller stopped");
        });
    }

    /// Stop the timer. In-flight requests are left to finish; their
    /// completions still go through the store's ordering guard.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// One tick: fetch, decode, apply. All failures end here.
async fn run_tick(
    seq: u64,
    client: StationClient,
    store: Arc<ReadingStore>,
    health: watch::Sender<PollHealth>,
) {
    match client.fetch_reading().await {
        Ok(reading) => {
            if store.apply(Sample::new(seq, reading)) {
                health.send_replace(PollHealth::Live);
            } else {
                // A later request already resolved; latest-issued wins.
                debug!(seq, "dropped stale completion");
            }
        }
        Err(e) => {
            warn!(seq, error = %e, "tick failed, skipping");
            health.send_replace(PollHealth::Failing {
                error: e.to_string(),
            });
        }
    }
}
