//! Data bridge — connects the poller's watch streams to TUI actions.
//!
//! Runs as a background task: forwards every applied sample and every poll
//! health transition as an [`Action`] through the TUI's action channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sensorium_core::{PollHealth, Sample};

use crate::action::Action;

/// Forward poller streams into the action channel until cancelled.
///
/// Sends the current sample (if any) immediately so the dashboard has data
/// on first render, then loops on watch notifications.
pub async fn run_data_bridge(
    mut readings: watch::Receiver<Option<Arc<Sample>>>,
    mut health: watch::Receiver<PollHealth>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    // Initial snapshot, if a tick already completed
    if let Some(sample) = readings.borrow_and_update().clone() {
        let _ = action_tx.send(Action::ReadingUpdated(sample));
    }
    let _ = action_tx.send(Action::HealthUpdated(health.borrow_and_update().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = readings.changed() => {
                if changed.is_err() {
                    break;
                }
                let sample = readings.borrow_and_update().clone();
                if let Some(sample) = sample {
                    let _ = action_tx.send(Action::ReadingUpdated(sample));
                }
            }

            changed = health.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = health.borrow_and_update().clone();
                let _ = action_tx.send(Action::HealthUpdated(state));
            }
        }
    }

    debug!("data bridge shut down");
}
