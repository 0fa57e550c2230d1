//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the cleaned table, and the current menu
//! selection.  Every draw recomputes the selected chart from the table, so
//! the view on screen is always derived from the data and never from cached
//! figure state.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use dash_core::models::ChartRequest;
use dash_data::charts;
use dash_data::table::CleanTable;

use crate::chart_view;
use crate::table_view;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Cleaned dataset every chart is computed from.
    pub table: CleanTable,
    /// Index into [`ChartRequest::ALL`] of the highlighted menu entry.
    pub selected: usize,
    /// When set, the raw-table preview replaces the chart pane.
    pub show_table: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application over an already cleaned table.
    pub fn new(theme_name: &str, table: CleanTable) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            table,
            selected: 0,
            show_table: false,
            should_quit: false,
        }
    }

    /// The currently highlighted menu entry.
    pub fn selected_request(&self) -> ChartRequest {
        ChartRequest::ALL[self.selected]
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// redraws keep happening while the user is idle.  The loop exits on
    /// `q`, `Q`, or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up => {
                self.selected = self
                    .selected
                    .checked_sub(1)
                    .unwrap_or(ChartRequest::ALL.len() - 1);
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % ChartRequest::ALL.len();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.show_table = !self.show_table,
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Reports Metric Dashboard ",
                self.theme.header,
            ))),
            chunks[0],
        );

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(10)])
            .split(chunks[1]);

        self.render_menu(frame, panes[0]);

        if self.show_table {
            table_view::render_table_view(frame, panes[1], &self.table, &self.theme);
        } else {
            match charts::select(self.selected_request(), &self.table) {
                Ok(result) => chart_view::render_chart(frame, panes[1], &result, &self.theme),
                Err(err) => chart_view::render_chart_error(frame, panes[1], &err, &self.theme),
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Up/Down select chart · d raw data · q quit ",
                self.theme.dim,
            ))),
            chunks[2],
        );
    }

    /// Draw the chart menu with the active entry highlighted.
    fn render_menu(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let lines: Vec<Line> = ChartRequest::ALL
            .iter()
            .enumerate()
            .map(|(i, request)| {
                if i == self.selected {
                    Line::from(Span::styled(
                        format!("> {}", request.label()),
                        self.theme.menu_selected,
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}", request.label()),
                        self.theme.menu_item,
                    ))
                }
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.separator)
                    .title(" Select a Chart "),
            ),
            area,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::models::columns;
    use dash_data::clean::clean;
    use dash_data::table::RawTable;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_table() -> CleanTable {
        let columns = vec![
            columns::CREATED_DATE_TIME.to_string(),
            columns::MODIFIED_DATE_TIME.to_string(),
            columns::WORKSPACE_NAME.to_string(),
        ];
        let rows = vec![
            vec![
                "2024-01-05 10:00:00".to_string(),
                "2024-01-06".to_string(),
                "Sales".to_string(),
            ],
            vec![
                "2024-02-10".to_string(),
                "2024-02-11".to_string(),
                "Finance".to_string(),
            ],
        ];
        clean(RawTable::new(columns, rows))
    }

    // ── Key handling ─────────────────────────────────────────────────────────

    #[test]
    fn test_down_up_moves_selection() {
        let mut app = App::new("dark", sample_table());
        assert_eq!(app.selected_request(), ChartRequest::DatasetInfo);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_request(), ChartRequest::TopWorkspaces);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_request(), ChartRequest::DatasetInfo);
    }

    #[test]
    fn test_selection_wraps_both_directions() {
        let mut app = App::new("dark", sample_table());
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, ChartRequest::ALL.len() - 1);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_d_toggles_raw_table() {
        let mut app = App::new("dark", sample_table());
        assert!(!app.show_table);
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.show_table);
        app.handle_key(key(KeyCode::Char('D')));
        assert!(!app.show_table);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new("dark", sample_table());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new("dark", sample_table());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unhandled_key_changes_nothing() {
        let mut app = App::new("dark", sample_table());
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.selected, 0);
        assert!(!app.show_table);
        assert!(!app.should_quit);
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_menu_entry_does_not_panic() {
        let mut app = App::new("dark", sample_table());
        let backend = TestBackend::new(120, 35);
        let mut terminal = Terminal::new(backend).unwrap();
        for i in 0..ChartRequest::ALL.len() {
            app.selected = i;
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
    }

    #[test]
    fn test_render_raw_table_mode_does_not_panic() {
        let mut app = App::new("dark", sample_table());
        app.show_table = true;
        let backend = TestBackend::new(120, 35);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_render_missing_column_shows_error_panel_without_panic() {
        // Table lacks WORKSPACE_TYPE so that selection renders the error pane.
        let mut app = App::new("dark", sample_table());
        app.selected = ChartRequest::ALL
            .iter()
            .position(|r| *r == ChartRequest::WorkspaceTypes)
            .unwrap();
        let backend = TestBackend::new(120, 35);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
