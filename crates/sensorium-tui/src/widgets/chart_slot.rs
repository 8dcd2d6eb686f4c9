//! The chart slot: single-owner holder of the live chart handle.
//!
//! Each applied reading rebuilds the chart from scratch: the previous handle
//! is released before the new one is constructed, so at any observation
//! point zero or one chart is mounted, never two.
//!
//! The chart plots one series ("Sensor Data") against four fixed category
//! labels, with the y-axis forced to start at zero. Four heterogeneous
//! units on one linear axis is inherited from the station's original
//! dashboard and preserved as-is.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use sensorium_api::Reading;

use crate::theme;

/// The one dataset's legend name.
pub const SERIES_LABEL: &str = "Sensor Data";

/// Fixed category labels, in series order.
pub const CATEGORY_LABELS: [&str; 4] = ["Temperature", "Humidity", "Air Quality", "Water Level"];

/// The live chart: one series over the four categories.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    points: [(f64, f64); 4],
    y_max: f64,
}

impl ChartHandle {
    /// Construct a chart for a reading. Categories are plotted at x = 0..=3.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn new(reading: &Reading) -> Self {
        let series = reading.series();
        let mut points = [(0.0, 0.0); 4];
        for (i, (point, value)) in points.iter_mut().zip(series).enumerate() {
            *point = (i as f64, value);
        }

        let y_max = series.iter().copied().fold(0.0_f64, f64::max).max(1.0);
        Self { points, y_max }
    }

    /// The plotted data points.
    pub fn points(&self) -> &[(f64, f64); 4] {
        &self.points
    }

    /// Y-axis bounds. Always starts at zero.
    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, self.y_max]
    }

    /// Draw the chart into the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dataset = Dataset::default()
            .name(SERIES_LABEL)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::series_style())
            .data(&self.points);

        let x_labels: Vec<Span> = CATEGORY_LABELS
            .iter()
            .map(|label| Span::styled(*label, theme::axis_style()))
            .collect();

        let [y_min, y_max] = self.y_bounds();
        let y_labels = vec![
            Span::styled(format!("{y_min:.0}"), theme::axis_style()),
            Span::styled(format!("{:.0}", y_max / 2.0), theme::axis_style()),
            Span::styled(format!("{y_max:.0}"), theme::axis_style()),
        ];

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(format!(" {SERIES_LABEL} "))
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default()),
            )
            .x_axis(
                Axis::default()
                    .style(theme::axis_style())
                    .bounds([0.0, 3.0])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(theme::axis_style())
                    .bounds(self.y_bounds())
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}

/// Single-owner resource slot for the chart handle.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartHandle>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the previous chart (if any), then build and mount a new one.
    pub fn replace(&mut self, reading: &Reading) {
        // Release before constructing: never two live handles.
        drop(self.current.take());
        self.current = Some(ChartHandle::new(reading));
    }

    /// The currently mounted chart, if any.
    pub fn current(&self) -> Option<&ChartHandle> {
        self.current.as_ref()
    }
}
