//! Application core — event loop, action dispatch, status bar.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::info;

use sensorium_core::PollHealth;

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::dashboard::DashboardScreen;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// The one screen.
    dashboard: DashboardScreen,
    /// Whether the app should keep running.
    running: bool,
    /// Poll health for the status bar indicator.
    health: PollHealth,
    /// Help overlay visibility.
    help_visible: bool,
    /// Action sender — the data bridge dispatches actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            dashboard: DashboardScreen::new(),
            running: true,
            health: PollHealth::default(),
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    /// A sender for dispatching actions from outside the event loop
    /// (the data bridge task).
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.dashboard.init(self.action_tx.clone())?;

        // ~30 FPS render pulse; the data-age line repaints with every frame
        let mut events = EventReader::new(Duration::from_millis(33));

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// anything else is delegated to the dashboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => {
                return Ok(Some(Action::Quit));
            }

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            _ => {}
        }

        self.dashboard.handle_key_event(key)
    }

    /// Process a single action — update app state and propagate to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::HealthUpdated(health) => {
                self.health = health.clone();
            }

            // Render is handled in the main loop; Resize only triggers a
            // repaint on the next render.
            Action::Render | Action::Resize(_, _) => {}

            // Propagate everything else to the dashboard
            other => {
                if let Some(follow_up) = self.dashboard.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [dashboard] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Dashboard content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.dashboard.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom status bar with poll health and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let health_indicator = match &self.health {
            PollHealth::Live => {
                Span::styled("● live", Style::default().fg(theme::LEAF_GREEN))
            }
            PollHealth::NoData => {
                Span::styled("○ waiting", Style::default().fg(theme::AMBER))
            }
            PollHealth::Failing { error } => Span::styled(
                format!("○ failing: {error}"),
                Style::default().fg(theme::ERROR_RED),
            ),
        };

        let hints = Span::styled(" │ ? help  q quit", theme::key_hint());

        let line = Line::from(vec![Span::raw(" "), health_indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = 8u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, width, height);

        let block = Block::default()
            .title(" Help ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(help_area);

        frame.render_widget(Clear, help_area);
        frame.render_widget(block, help_area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  q / Esc     quit",
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(Span::styled(
                "  ?           toggle this help",
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Readings refresh automatically.",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
