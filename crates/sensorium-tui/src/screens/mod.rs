//! TUI screens. The dashboard is the only screen.

pub mod dashboard;
