//! Claims tables (recent / unpaid) for the MedVisor TUI.
//!
//! Renders the tab strip, the search line, a bordered
//! [`ratatui::widgets::Table`] holding one page of claims and the
//! pagination caption underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use medvisor_core::models::ClaimRecord;
use medvisor_data::table::{ClaimColumn, Page, RECENT_COLUMNS, UNPAID_COLUMNS};

use crate::themes::Theme;

// ── ClaimsTab ─────────────────────────────────────────────────────────────────

/// Which claims table is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimsTab {
    #[default]
    Recent,
    Unpaid,
}

impl ClaimsTab {
    pub const ALL: [ClaimsTab; 2] = [ClaimsTab::Recent, ClaimsTab::Unpaid];

    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recent Claims",
            Self::Unpaid => "Unpaid > 60 Days",
        }
    }

    /// Table title, also used to name exports.
    pub fn title(self) -> &'static str {
        match self {
            Self::Recent => "Recent Claims",
            Self::Unpaid => "Unpaid Claims",
        }
    }

    pub fn columns(self) -> &'static [ClaimColumn] {
        match self {
            Self::Recent => &RECENT_COLUMNS,
            Self::Unpaid => &UNPAID_COLUMNS,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Recent => Self::Unpaid,
            Self::Unpaid => Self::Recent,
        }
    }
}

/// Everything needed to draw one claims table.
pub struct ClaimsTableData<'a> {
    pub tab: ClaimsTab,
    pub page: Page<'a, &'a ClaimRecord>,
    pub search: &'a str,
    /// Whether keystrokes currently go to the search box.
    pub search_active: bool,
}

// ── Line builders ─────────────────────────────────────────────────────────────

pub fn tab_line<'a>(active: ClaimsTab, theme: &'a Theme) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, tab) in ClaimsTab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", theme.separator));
        }
        let style = if *tab == active {
            theme.tab_active
        } else {
            theme.tab_inactive
        };
        spans.push(Span::styled(tab.label(), style));
    }
    Line::from(spans)
}

pub fn search_line<'a>(search: &'a str, active: bool, theme: &'a Theme) -> Line<'a> {
    let mut spans = vec![Span::styled("Search: ", theme.label)];
    if search.is_empty() && !active {
        spans.push(Span::styled("press / to filter claims", theme.dim));
    } else {
        spans.push(Span::styled(search, theme.text));
    }
    if active {
        spans.push(Span::styled("▏", theme.prompt));
    }
    Line::from(spans)
}

/// `"Showing 1-10 of 23 results  ·  Page 1 of 3"`.
pub fn pagination_line<'a, T>(page: &Page<'_, T>, theme: &'a Theme) -> Line<'a> {
    let mut spans = vec![Span::styled(page.caption(), theme.dim)];
    if page.total_pages > 1 {
        spans.push(Span::styled(
            format!("  ·  Page {} of {}", page.number, page.total_pages),
            theme.label,
        ));
    }
    Line::from(spans)
}

fn claim_row<'a>(
    record: &ClaimRecord,
    columns: &[ClaimColumn],
    index: usize,
    theme: &Theme,
) -> Row<'a> {
    let row_style = if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    };
    let cells: Vec<Cell> = columns
        .iter()
        .map(|column| {
            let cell = Cell::from(column.cell(record));
            if *column == ClaimColumn::Status {
                cell.style(theme.status_style(&record.status()))
            } else {
                cell
            }
        })
        .collect();
    Row::new(cells).style(row_style)
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render a claims table with its tabs, search line and caption into `area`.
pub fn render_claims_table(frame: &mut Frame, area: Rect, data: &ClaimsTableData, theme: &Theme) {
    let [tabs_area, search_area, table_area, caption_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(tab_line(data.tab, theme)), tabs_area);
    frame.render_widget(
        Paragraph::new(search_line(data.search, data.search_active, theme)),
        search_area,
    );

    if data.page.total == 0 {
        render_no_data(frame, table_area, data.search, theme);
    } else {
        let columns = data.tab.columns();
        let header = Row::new(
            columns
                .iter()
                .map(|c| Cell::from(c.label()).style(theme.table_header)),
        )
        .height(1);

        let rows: Vec<Row> = data
            .page
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| claim_row(record, columns, i, theme))
            .collect();

        let widths: Vec<Constraint> = columns
            .iter()
            .map(|_| Constraint::Ratio(1, columns.len() as u32))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(format!(" {} ", data.tab.title())),
            )
            .style(theme.text);
        frame.render_widget(table, table_area);
    }

    frame.render_widget(Paragraph::new(pagination_line(&data.page, theme)), caption_area);
}

/// Render the placeholder shown when no claim matches.
pub fn render_no_data(frame: &mut Frame, area: Rect, search: &str, theme: &Theme) {
    let message = if search.trim().is_empty() {
        "No claims to display".to_string()
    } else {
        format!("No claims match \"{}\"", search.trim())
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'u' to upload a claims CSV", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
