use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use medvisor_core::formatting::format_change;
use medvisor_core::models::{ChangeType, KpiKind, KpiMetric, KpiSet};

use crate::themes::Theme;

// ── KpiCard ──────────────────────────────────────────────────────────────────

/// One headline metric: title, formatted value and change line.
pub struct KpiCard<'a> {
    pub kind: KpiKind,
    pub metric: &'a KpiMetric,
    pub theme: &'a Theme,
}

impl<'a> KpiCard<'a> {
    pub fn new(kind: KpiKind, metric: &'a KpiMetric, theme: &'a Theme) -> Self {
        Self {
            kind,
            metric,
            theme,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self.metric.change.change_type {
            ChangeType::Increase => "▲",
            ChangeType::Decrease => "▼",
        }
    }

    /// Card body: value line then `"▲ +2.3% vs last period"`.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let change_style = self.theme.change_style(self.metric.change.change_type);
        vec![
            Line::from(Span::styled(
                self.kind.format_value(self.metric.value),
                self.theme.kpi_style(self.kind.variant()),
            )),
            Line::from(vec![
                Span::styled(
                    format!("{} {}", self.arrow(), format_change(&self.metric.change)),
                    change_style,
                ),
                Span::styled(" vs last period", self.theme.dim),
            ]),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card_border)
            .title(Span::styled(format!(" {} ", self.kind.title()), self.theme.label));
        frame.render_widget(Paragraph::new(Text::from(self.to_lines())).block(block), area);
    }
}

/// Lay out one card per entry of `kinds` side by side across `area`.
pub fn render_kpi_row(
    frame: &mut Frame,
    area: Rect,
    kinds: &[KpiKind],
    kpis: &KpiSet,
    theme: &Theme,
) {
    if kinds.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = kinds
        .iter()
        .map(|_| Constraint::Ratio(1, kinds.len() as u32))
        .collect();
    let cells = Layout::horizontal(constraints).split(area);

    for (kind, cell) in kinds.iter().zip(cells.iter()) {
        KpiCard::new(*kind, kpis.metric(*kind), theme).render(frame, *cell);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
