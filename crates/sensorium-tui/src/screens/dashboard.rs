//! Dashboard screen — the four sensor fields and the chart.
//!
//! Layout:
//! ┌─ Readings ────────────────────────────────┐
//! │ Temperature   23.5°C                       │
//! │ Humidity      60%                          │
//! │ Air Quality   400 ppm                      │
//! │ Water Level   High                         │
//! └────────────────────────────────────────────┘
//! ┌─ Sensor Data ──────────────────────────────┐
//! │  single-series line chart over the four    │
//! │  categories, y-axis from zero              │
//! └────────────────────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::warn;

use sensorium_api::Reading;
use sensorium_core::Sample;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::chart_slot::{CATEGORY_LABELS, ChartSlot};
use crate::widgets::surface::{MOUNTS, Surface};

/// Dashboard screen state: the display surface and the chart slot.
pub struct DashboardScreen {
    surface: Surface,
    chart: ChartSlot,
    /// The sample behind the currently displayed state (for the age line).
    last_sample: Option<Arc<Sample>>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            chart: ChartSlot::new(),
            last_sample: None,
        }
    }

    /// Project a reading onto the surface and rebuild the chart.
    ///
    /// Text mounts are written first; if one is missing the render is
    /// abandoned before the chart is touched, and the poll loop carries on.
    fn apply_reading(&mut self, reading: &Reading) {
        if let Err(e) = self.surface.write_reading(reading) {
            warn!(error = %e, "render abandoned");
            return;
        }
        self.chart.replace(reading);
    }

    /// Format the data age as a human-readable string for the title bar.
    fn refresh_age_str(&self) -> String {
        match &self.last_sample {
            Some(sample) => {
                let secs = (chrono::Utc::now() - sample.received_at)
                    .num_seconds()
                    .max(0);
                if secs < 5 {
                    "just now".into()
                } else if secs < 60 {
                    format!("{secs}s ago")
                } else {
                    format!("{}m ago", secs / 60)
                }
            }
            None => "no data".into(),
        }
    }

    /// Render the readings panel: one line per mount, label + value.
    fn render_readings(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Readings ")
            .title_style(theme::title_style())
            .title_bottom(Line::from(format!(" {} ", self.refresh_age_str())).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.last_sample.is_none() {
            frame.render_widget(
                Paragraph::new("  Waiting for the first reading...")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = MOUNTS
            .iter()
            .zip(CATEGORY_LABELS)
            .map(|(id, label)| {
                let value = self.surface.text(id).unwrap_or_default();
                Line::from(vec![
                    Span::styled(format!("  {label:<13}"), theme::field_label()),
                    Span::styled(value.to_owned(), theme::field_value()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the chart panel, or a placeholder before the first reading.
    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        if let Some(chart) = self.chart.current() {
            chart.render(frame, area);
            return;
        }

        let block = Block::default()
            .title(" Sensor Data ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("  No chart data yet").style(Style::default().fg(theme::BORDER_GRAY)),
            inner,
        );
    }

    #[cfg(test)]
    fn surface(&self) -> &Surface {
        &self.surface
    }

    #[cfg(test)]
    fn chart(&self) -> &ChartSlot {
        &self.chart
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ReadingUpdated(sample) = action {
            self.apply_reading(&sample.reading);
            self.last_sample = Some(Arc::clone(sample));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(6), // Readings panel
            Constraint::Min(5),    // Chart
        ])
        .split(area);

        self.render_readings(frame, layout[0]);
        self.render_chart(frame, layout[1]);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use sensorium_api::WaterLevel;
    use sensorium_core::PollHealth;

    use super::*;
    use crate::widgets::surface;

    fn sample(seq: u64, temperature: f64, water_level: WaterLevel) -> Arc<Sample> {
        Arc::new(Sample::new(
            seq,
            Reading {
                temperature,
                humidity: 60.0,
                air_quality: 400.0,
                water_level,
            },
        ))
    }

    #[test]
    fn reading_update_writes_fields_and_chart() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::ReadingUpdated(sample(1, 23.5, WaterLevel::High)))
            .expect("update succeeds");

        assert_eq!(screen.surface().text(surface::TEMPERATURE), Some("23.5°C"));
        assert_eq!(screen.surface().text(surface::HUMIDITY), Some("60%"));
        assert_eq!(screen.surface().text(surface::AIR_QUALITY), Some("400 ppm"));
        assert_eq!(screen.surface().text(surface::WATER_LEVEL), Some("High"));

        let chart = screen.chart().current().expect("chart mounted");
        assert_eq!(
            *chart.points(),
            [(0.0, 23.5), (1.0, 60.0), (2.0, 400.0), (3.0, 1.0)]
        );
    }

    #[test]
    fn repeated_update_leaves_equivalent_state() {
        let mut screen = DashboardScreen::new();
        let s = sample(1, 23.5, WaterLevel::High);
        screen
            .update(&Action::ReadingUpdated(Arc::clone(&s)))
            .expect("first update");
        let chart_before = screen.chart().current().cloned();

        screen
            .update(&Action::ReadingUpdated(s))
            .expect("second update");
        assert_eq!(screen.surface().text(surface::TEMPERATURE), Some("23.5°C"));
        assert_eq!(screen.chart().current().cloned(), chart_before);
    }

    #[test]
    fn health_transitions_do_not_touch_the_display() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::ReadingUpdated(sample(1, 18.0, WaterLevel::Low)))
            .expect("update succeeds");

        screen
            .update(&Action::HealthUpdated(PollHealth::Failing {
                error: "HTTP 500".into(),
            }))
            .expect("health update succeeds");

        // A failed tick publishes nothing; the last reading stays visible.
        assert_eq!(screen.surface().text(surface::TEMPERATURE), Some("18°C"));
        assert_eq!(screen.surface().text(surface::WATER_LEVEL), Some("Low"));
        assert!(screen.chart().current().is_some());
    }
}
