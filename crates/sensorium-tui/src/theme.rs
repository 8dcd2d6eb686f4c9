//! Palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

// ── Core palette ──────────────────────────────────────────────────────

pub const LEAF_GREEN: Color = Color::Rgb(76, 175, 80); // #4caf50 — series color
pub const SKY_CYAN: Color = Color::Rgb(102, 217, 239); // #66d9ef
pub const AMBER: Color = Color::Rgb(253, 200, 94); // #fdc85e
pub const ERROR_RED: Color = Color::Rgb(249, 93, 93); // #f95d5d
pub const DIM_WHITE: Color = Color::Rgb(197, 200, 209); // #c5c8d1
pub const BORDER_GRAY: Color = Color::Rgb(96, 105, 130); // #606982

// ── Semantic styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(SKY_CYAN).add_modifier(Modifier::BOLD)
}

/// Default panel border.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Field label (left column of the readings panel).
pub fn field_label() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Field value (the formatted reading).
pub fn field_value() -> Style {
    Style::default().fg(DIM_WHITE).add_modifier(Modifier::BOLD)
}

/// The chart series.
pub fn series_style() -> Style {
    Style::default().fg(LEAF_GREEN)
}

/// Axis labels.
pub fn axis_style() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Dimmed key hints in the status bar.
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}
