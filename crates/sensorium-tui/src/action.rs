//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use sensorium_core::{PollHealth, Sample};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Render,
    Resize(u16, u16),

    // ── Data events (from the poller via the data bridge) ─────────
    /// A new sample was applied by the store.
    ReadingUpdated(Arc<Sample>),
    /// The poll loop's health changed.
    HealthUpdated(PollHealth),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
