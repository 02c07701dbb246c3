//! Main application state and TUI event loop for MedVisor.
//!
//! [`App`] owns the theme, the [`DashboardState`] and the snapshot derived
//! from it, plus the table navigation state (tab, page, search).  Keyboard
//! input is routed through [`App::handle_key`] so it can be driven without
//! a terminal.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::warn;

use medvisor_core::models::{ClaimRecord, KpiKind};
use medvisor_core::{BillingError, Result};
use medvisor_data::analysis::{DashboardSnapshot, DashboardState};
use medvisor_data::reader::REQUIRED_HEADERS;
use medvisor_data::table::{self, filter_claims, paginate};

use crate::charts;
use crate::components::insights::insight_lines;
use crate::components::kpi_card::render_kpi_row;
use crate::components::Header;
use crate::table_view::{self, ClaimsTab, ClaimsTableData};
use crate::themes::Theme;

// ── InputMode / StatusMessage ─────────────────────────────────────────────────

/// Where typed characters go while the uploader is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line notice shown in the footer until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

const KEY_HELP: &str = "q quit · u upload · Tab switch table · / search · n/p page · e export";

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the MedVisor TUI.
pub struct App {
    pub theme: Theme,
    pub state: DashboardState,
    /// View-models for the current `state`; rebuilt after every upload.
    pub snapshot: DashboardSnapshot,
    pub tab: ClaimsTab,
    /// 1-based page of the visible table.
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub input_mode: InputMode,
    /// Path typed into the uploader prompt.
    pub upload_input: String,
    pub status: Option<StatusMessage>,
    /// Directory table exports are written into.
    pub export_dir: PathBuf,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, page_size: usize, export_dir: PathBuf) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            state: DashboardState::new(),
            snapshot: DashboardSnapshot::sample(),
            tab: ClaimsTab::default(),
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            input_mode: InputMode::default(),
            upload_input: String::new(),
            status: None,
            export_dir,
            should_quit: false,
        }
    }

    /// Rebuild the snapshot for the current state with windows ending at `now`.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.snapshot = DashboardSnapshot::build(&self.state, now);
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without busy-waiting.  Terminal I/O failures surface as
    /// [`BillingError::Terminal`].
    pub fn run(mut self) -> Result<()> {
        self.run_terminal().map_err(terminal_error)
    }

    fn run_terminal(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
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

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.state.show_uploader {
            self.handle_upload_key(key);
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('u') => self.open_uploader(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.next();
                self.page = 1;
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => self.next_page(),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => self.previous_page(),
            KeyCode::Char('e') => self.export_current(),
            KeyCode::Esc => {
                self.search.clear();
                self.page = 1;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search.push(c);
                self.page = 1;
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.page = 1;
            }
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }
    }

    fn handle_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.upload_input.push(c),
            KeyCode::Backspace => {
                self.upload_input.pop();
            }
            KeyCode::Enter => {
                let raw = self.upload_input.trim().to_string();
                if raw.is_empty() {
                    self.status = Some(StatusMessage::error("Enter the path of a claims CSV"));
                } else {
                    self.upload(Path::new(&raw));
                }
            }
            KeyCode::Esc => self.state.show_uploader = false,
            _ => {}
        }
    }

    pub fn open_uploader(&mut self) {
        self.state.show_uploader = true;
        self.upload_input.clear();
    }

    /// Load `path` into the dashboard and report the outcome in the footer.
    ///
    /// A failed load keeps the previous records and leaves the uploader open.
    pub fn upload(&mut self, path: &Path) {
        match self.state.upload_file(path) {
            Ok(rows) => {
                self.refresh(Utc::now());
                self.page = 1;
                self.upload_input.clear();
                self.status = Some(StatusMessage::info(format!("Processed {} rows", rows)));
            }
            Err(e) => {
                warn!("upload of {} failed: {}", path.display(), e);
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    // ── Table navigation ──────────────────────────────────────────────────────

    /// Records of the active tab before search filtering.
    pub fn tab_records(&self) -> &[ClaimRecord] {
        match self.tab {
            ClaimsTab::Recent => &self.snapshot.recent_claims,
            ClaimsTab::Unpaid => &self.snapshot.unpaid_claims,
        }
    }

    /// Records of the active tab matching the search term.
    pub fn visible_records(&self) -> Vec<&ClaimRecord> {
        filter_claims(self.tab_records(), &self.search)
    }

    pub fn total_pages(&self) -> usize {
        self.visible_records().len().div_ceil(self.page_size)
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Write the active (filtered) table to CSV in `export_dir`.
    pub fn export_current(&mut self) {
        let records = self.visible_records();
        let rows = records.len();
        let result = table::export_table(
            &self.export_dir,
            self.tab.title(),
            &records,
            self.tab.columns(),
        );
        let status = match result {
            Ok(path) => {
                StatusMessage::info(format!("Exported {} rows to {}", rows, path.display()))
            }
            Err(e) => StatusMessage::error(e.to_string()),
        };
        self.status = Some(status);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    /// Render the full dashboard into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let [header_area, primary_area, secondary_area, middle_area, table_area, footer_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(4),
                // 12 month points plus borders
                Constraint::Length(14),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let source = self
            .state
            .source
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());
        let source = if self.snapshot.is_sample_data { None } else { source };
        frame.render_widget(
            Paragraph::new(Text::from(Header::new(source, theme).to_lines())),
            header_area,
        );

        render_kpi_row(frame, primary_area, &KpiKind::PRIMARY, &self.snapshot.kpis, theme);
        render_kpi_row(frame, secondary_area, &KpiKind::SECONDARY, &self.snapshot.kpis, theme);

        let [charts_area, insights_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(middle_area);
        charts::render_charts(
            frame,
            charts_area,
            &self.snapshot.denial_trend,
            &self.snapshot.denial_reasons,
            theme,
        );
        frame.render_widget(
            Paragraph::new(Text::from(insight_lines(&self.snapshot.insights, theme)))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.card_border)
                        .title(" AI Insights "),
                ),
            insights_area,
        );

        let records = self.visible_records();
        let data = ClaimsTableData {
            tab: self.tab,
            page: paginate(&records, self.page, self.page_size),
            search: &self.search,
            search_active: self.input_mode == InputMode::Search,
        };
        table_view::render_claims_table(frame, table_area, &data, theme);

        frame.render_widget(Paragraph::new(self.footer_line()), footer_area);

        if self.state.show_uploader {
            self.render_uploader(frame);
        }
    }

    fn footer_line(&self) -> Line<'_> {
        match &self.status {
            Some(status) => {
                let style = match status.kind {
                    StatusKind::Info => self.theme.notification_info,
                    StatusKind::Error => self.theme.notification_error,
                };
                Line::from(vec![
                    Span::styled(status.text.as_str(), style),
                    Span::styled("  ·  ", self.theme.separator),
                    Span::styled(KEY_HELP, self.theme.dim),
                ])
            }
            None => Line::from(Span::styled(KEY_HELP, self.theme.dim)),
        }
    }

    fn render_uploader(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let area = centered(frame.area(), 70, 8);
        let lines = vec![
            Line::from(Span::styled(
                "Path to a claims CSV export:",
                theme.label,
            )),
            Line::from(vec![
                Span::styled("> ", theme.prompt),
                Span::styled(self.upload_input.as_str(), theme.text),
                Span::styled("▏", theme.prompt),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("Required columns: {}", REQUIRED_HEADERS.join(", ")),
                theme.dim,
            )),
            Line::from(Span::styled("Enter to load · Esc to cancel", theme.dim)),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.prompt)
                        .title(" Upload Claims "),
                ),
            area,
        );
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
fn terminal_error(err: io::Error) -> BillingError {
    BillingError::Terminal(err.to_string())
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ── Tests ──────────────────────────────────────────────────────────────────────
