//! Reusable dashboard widgets: the text-mount surface and the chart slot.

pub mod chart_slot;
pub mod surface;
