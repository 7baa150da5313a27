//! Terminal front-end.
//!
//! Renders the toggle state, the latest latency readout, and the chart of
//! recent samples; owns at most one [`Session`] at a time. All probing
//! happens inside the session's task, so the render loop stays responsive.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::{Frame, Terminal};

use crate::config::AppConfig;
use crate::presenter::{self, DisplayState, SessionStatus};
use crate::probe::Prober;
use crate::sampler::{Session, SessionStats};

/// Render tick (4 Hz is plenty for 1 Hz samples).
const TICK: Duration = Duration::from_millis(250);

/// Terminal application driving the sampler.
pub struct App {
    config: AppConfig,
    prober: Arc<dyn Prober>,
    session: Option<Session>,
}

impl App {
    pub fn new(config: AppConfig, prober: Arc<dyn Prober>) -> Self {
        Self {
            config,
            prober,
            session: None,
        }
    }

    /// Run the front-end until the user quits.
    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        loop {
            let (view, stats) = self.view();
            terminal.draw(|frame| draw(frame, &self.config, &view, &stats))?;

            tokio::select! {
                _ = tick.tick() => {}
                maybe_ev = events.next() => {
                    let Some(ev) = maybe_ev else { break };
                    if let Event::Key(key) = ev? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match (key.modifiers, key.code) {
                            (_, KeyCode::Char(' ')) => self.toggle().await,
                            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => break,
                            (KeyModifiers::CONTROL, KeyCode::Char('c')) => break,
                            _ => {}
                        }
                    }
                }
            }
        }

        if let Some(session) = self.session.take() {
            session.stop().await;
        }
        Ok(())
    }

    /// Flip the toggle: stop the live session, or start a fresh one.
    ///
    /// Stopping fully tears down the old loop before a new session can be
    /// started, so rapid toggling never leaves two loops running.
    async fn toggle(&mut self) {
        match self.session.take() {
            Some(session) => session.stop().await,
            None => {
                let session =
                    Session::start(self.config.session_config(), Arc::clone(&self.prober));
                self.session = Some(session);
            }
        }
    }

    fn view(&self) -> (DisplayState, SessionStats) {
        match &self.session {
            Some(session) => {
                let samples = session.samples();
                (
                    presenter::project(session.is_active(), &samples, self.config.window),
                    session.stats(),
                )
            }
            None => (
                presenter::project(false, &[], self.config.window),
                SessionStats::default(),
            ),
        }
    }
}

fn draw(frame: &mut Frame, config: &AppConfig, view: &DisplayState, stats: &SessionStats) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.area());

    draw_status(frame, rows[0], config, view);
    draw_readout(frame, rows[1], view);
    draw_chart(frame, rows[2], config, view);
    draw_stats(frame, rows[3], stats);
}

fn draw_status(frame: &mut Frame, area: Rect, config: &AppConfig, view: &DisplayState) {
    let status_style = match view.status {
        SessionStatus::Running => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        SessionStatus::Idle => Style::default().fg(Color::DarkGray),
    };
    let line = Line::from(vec![
        Span::styled(view.status.as_ref(), status_style),
        Span::raw("  "),
        Span::styled(config.target.as_str(), Style::default().fg(Color::Gray)),
        Span::raw("   space toggle | q quit"),
    ]);
    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("pinggraph"));
    frame.render_widget(status, area);
}

fn draw_readout(frame: &mut Frame, area: Rect, view: &DisplayState) {
    let readout = Paragraph::new(Line::from(Span::styled(
        view.readout.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title("Latency"));
    frame.render_widget(readout, area);
}

fn draw_chart(frame: &mut Frame, area: Rect, config: &AppConfig, view: &DisplayState) {
    let x_max = (config.window.saturating_sub(1)).max(1) as f64;
    let y_max = (view.max_latency().max(10.0) * 1.10).min(10_000.0);

    let dataset = Dataset::default()
        .graph_type(GraphType::Line)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Cyan))
        .data(&view.points);

    let title = format!("Round-trip time (last {} samples)", config.window);
    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().title("ms").bounds([0.0, y_max]));
    frame.render_widget(chart, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: &SessionStats) {
    let line = Line::from(vec![
        Span::styled("samples: ", Style::default().fg(Color::Gray)),
        Span::raw(stats.produced.to_string()),
        Span::styled("   misses: ", Style::default().fg(Color::Gray)),
        Span::raw(stats.parse_misses.to_string()),
        Span::styled("   failures: ", Style::default().fg(Color::Gray)),
        Span::raw(stats.probe_failures.to_string()),
    ]);
    let stats_widget =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Session"));
    frame.render_widget(stats_widget, area);
}
