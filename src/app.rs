//! Main application logic and TUI event loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use rand::rngs::StdRng;

use crate::cli::AppConfig;
use crate::dashboard::{DashboardView, SnapshotObserver};
use crate::data::{MetricsGenerator, PostureSnapshot, SensorGrid};
use crate::ui::{
    chart::WeeklyHistogram,
    heatmap::Heatmap,
    pie::PosturePie,
    selector::{GridCursor, TabSelector, ViewTab},
    widgets::{StatusBar, UprightCard},
    HelpOverlay, Theme,
};

/// Upper bound on how long the loop waits for input
const MAX_POLL: Duration = Duration::from_millis(250);

/// Records when the live series last changed
#[derive(Debug, Default)]
struct RefreshStamp {
    last: Option<DateTime<Local>>,
}

impl SnapshotObserver for RefreshStamp {
    fn posture_refreshed(&mut self, _snapshot: &PostureSnapshot) {
        self.last = Some(Local::now());
    }

    fn live_grid_refreshed(&mut self, _grid: &SensorGrid) {
        self.last = Some(Local::now());
    }
}

/// Application state
pub struct App {
    theme: Theme,
    view: DashboardView<StdRng>,
    stamp: RefreshStamp,

    // UI state
    active_tab: ViewTab,
    cursor: GridCursor,
    show_help: bool,
    paused: bool,

    // Exit flag
    should_quit: bool,
}

impl App {
    /// Create a new App with an activated dashboard view
    pub fn new(config: &AppConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => MetricsGenerator::seeded(seed),
            None => MetricsGenerator::from_entropy(),
        };
        let mut view = DashboardView::new(generator, config.periods);
        view.activate(Instant::now());

        App {
            theme: Theme::default(),
            view,
            stamp: RefreshStamp::default(),
            active_tab: config.initial_tab,
            cursor: GridCursor::default(),
            show_help: false,
            paused: false,
            should_quit: false,
        }
    }

    /// Advance the live series to `now` unless paused
    fn tick(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        self.view.tick(now, &mut self.stamp);
    }

    /// How long the loop may block waiting for input
    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.view.next_deadline() {
            Some(deadline) if !self.paused => deadline.saturating_duration_since(now).min(MAX_POLL),
            _ => MAX_POLL,
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "live refresh toggled");
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) {
        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return;
        }

        match key {
            KeyCode::Char('p') => self.toggle_pause(),
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            KeyCode::Char(c) => {
                if let Some(tab) = c.to_digit(10).and_then(ViewTab::from_number) {
                    self.active_tab = tab;
                } else if self.active_tab.is_heatmap() {
                    self.handle_cursor(key);
                }
            }
            _ if self.active_tab.is_heatmap() => self.handle_cursor(key),
            _ => {}
        }
    }

    fn handle_cursor(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(),
            KeyCode::Left | KeyCode::Char('h') => self.cursor.left(),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.right(),
            _ => {}
        }
    }

    /// Grid shown by the active tab, if it is a heatmap
    fn active_grid(&self) -> Option<&SensorGrid> {
        match self.active_tab {
            ViewTab::WeeklyHeatmap => self.view.weekly_grid(),
            ViewTab::LiveHeatmap => self.view.live_grid(),
            _ => None,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(5), // Upright card
                Constraint::Length(1), // Tab selector
                Constraint::Min(10),   // Active view
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Digital Twins Dashboard",
                self.theme.title_style().add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(Span::styled(
                "Track your back health with real-time analytics.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]);
        frame.render_widget(header, main_chunks[0]);

        if let Some(share) = self.view.upright_share() {
            UprightCard::new(share, &self.theme).render(frame, centered_columns(60, main_chunks[1]));
        }

        TabSelector::new(self.active_tab, &self.theme).render(frame, main_chunks[2]);

        self.render_active_view(frame, main_chunks[3]);

        let cell_value = self
            .active_grid()
            .and_then(|grid| grid.get(self.cursor.row, self.cursor.col));
        StatusBar::new(self.active_tab.title(), self.stamp.last, &self.theme)
            .paused(self.paused)
            .cell_value(cell_value)
            .render(frame, main_chunks[4]);

        // Render help overlay if active
        if self.show_help {
            HelpOverlay::new(&self.theme).render(frame, size);
        }
    }

    fn render_active_view(&self, frame: &mut Frame, area: Rect) {
        match self.active_tab {
            ViewTab::OverviewHistogram => {
                if let Some(summaries) = self.view.daily_summaries() {
                    WeeklyHistogram::new(summaries, &self.theme).render(frame, area);
                }
            }
            ViewTab::WeeklyHeatmap => {
                if let Some(grid) = self.view.weekly_grid() {
                    Heatmap::new(
                        grid,
                        "Weekly Overview Heatmap",
                        "Mean sensor force distribution over the past 5 days.",
                        &self.theme,
                    )
                    .with_cursor(self.cursor)
                    .render(frame, area);
                }
            }
            ViewTab::LivePie => {
                if let Some(snapshot) = self.view.posture() {
                    PosturePie::new(snapshot, &self.theme).render(frame, area);
                }
            }
            ViewTab::LiveHeatmap => {
                if let Some(grid) = self.view.live_grid() {
                    Heatmap::new(
                        grid,
                        "Live Heatmap",
                        "Mean sensor force per square over the past 10 seconds.",
                        &self.theme,
                    )
                    .with_cursor(self.cursor)
                    .render(frame, area);
                }
            }
        }
    }
}

/// Horizontally centred slice of `area`, `percent` wide
fn centered_columns(percent: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(&config);

    // Main loop - wrap in a closure to ensure cleanup
    let result = run_main_loop(&mut terminal, &mut app);

    // Tear the view down before handing the terminal back
    app.view.deactivate();

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Render - if this fails, we should exit
        terminal.draw(|f| app.render(f))?;

        // Handle input with timeout bounded by the next refresh
        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn config(tab: ViewTab) -> AppConfig {
        let mut config = AppConfig::from_show_command(Some(4), 2000, 500, None, None).unwrap();
        config.initial_tab = tab;
        config
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let mut app = App::new(&config(ViewTab::OverviewHistogram));
        app.handle_input(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(app.active_tab, ViewTab::LivePie);
        app.handle_input(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.active_tab, ViewTab::LiveHeatmap);
        app.handle_input(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.active_tab, ViewTab::LivePie);
    }

    #[test]
    fn test_cursor_moves_only_on_heatmaps() {
        let mut app = App::new(&config(ViewTab::LivePie));
        app.handle_input(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.cursor, GridCursor::default());

        app.handle_input(KeyCode::Char('4'), KeyModifiers::NONE);
        app.handle_input(KeyCode::Down, KeyModifiers::NONE);
        app.handle_input(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(app.cursor, GridCursor { row: 1, col: 1 });
        assert_eq!(
            app.active_grid().and_then(|g| g.get(1, 1)),
            app.view.live_grid().and_then(|g| g.get(1, 1))
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = App::new(&config(ViewTab::OverviewHistogram));
        app.handle_input(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.show_help);
        app.handle_input(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.active_tab, ViewTab::OverviewHistogram);
        app.handle_input(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.show_help);
    }

    #[test]
    fn test_pause_holds_live_data() {
        let mut app = App::new(&config(ViewTab::LiveHeatmap));
        let before = app.view.live_grid().cloned();

        app.handle_input(KeyCode::Char('p'), KeyModifiers::NONE);
        app.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(app.view.live_grid().cloned(), before);
        assert!(app.stamp.last.is_none());
        assert_eq!(app.poll_timeout(Instant::now()), MAX_POLL);

        app.handle_input(KeyCode::Char('p'), KeyModifiers::NONE);
        app.tick(Instant::now() + Duration::from_secs(5));
        assert_ne!(app.view.live_grid().cloned(), before);
        assert!(app.stamp.last.is_some());
    }

    #[test]
    fn test_poll_timeout_bounded_by_next_refresh() {
        let app = App::new(&config(ViewTab::LiveHeatmap));
        assert!(app.poll_timeout(Instant::now()) <= MAX_POLL);
        let far = Instant::now() + Duration::from_secs(60);
        assert_eq!(app.poll_timeout(far), Duration::ZERO);
    }

    #[test]
    fn test_render_each_tab() {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        let mut app = App::new(&config(ViewTab::OverviewHistogram));

        let titles = [
            (ViewTab::OverviewHistogram, "Weekly Overview Histogram"),
            (ViewTab::WeeklyHeatmap, "Weekly Overview Heatmap"),
            (ViewTab::LivePie, "Upright: 60%"),
            (ViewTab::LiveHeatmap, "Value: "),
        ];
        for (tab, expected) in titles {
            app.active_tab = tab;
            terminal.draw(|f| app.render(f)).unwrap();
            let text = screen_text(&terminal);
            assert!(text.contains("Upright Sit Time"));
            assert!(text.contains("60.0%"));
            assert!(text.contains(expected), "{tab:?} screen is missing {expected:?}");
        }
    }

    #[test]
    fn test_render_warning_below_threshold() {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        let mut app = App::new(&config(ViewTab::LivePie));

        // Refresh until a low reading comes up; seeded, so this is stable
        let start = Instant::now();
        let mut step = 1;
        while !app.view.upright_share().unwrap().needs_warning() {
            app.tick(start + Duration::from_millis(2000 * step));
            step += 1;
        }
        terminal.draw(|f| app.render(f)).unwrap();
        assert!(screen_text(&terminal).contains("Warning: Please stand up or move around!"));
    }
}
