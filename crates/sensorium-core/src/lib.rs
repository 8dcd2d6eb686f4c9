//! `sensorium-core` — polling engine for the Sensorium dashboard.
//!
//! The [`Poller`] owns a repeating timer. On each tick it issues one GET to
//! the configured station endpoint, decodes the body, and publishes the
//! result through a [`tokio::sync::watch`] channel the UI subscribes to.
//! Failed ticks are logged and skipped; the timer never stops until the
//! poller is cancelled.
//!
//! Completions may arrive out of submission order (a slow tick does not
//! delay the next one). The store applies a latest-issued-wins rule: every
//! request carries a sequence number, and a completion is dropped if a
//! sample from a later request has already been applied.

pub mod poller;
pub mod store;

pub use poller::{PollHealth, Poller, PollerConfig};
pub use store::{ReadingStore, Sample};
