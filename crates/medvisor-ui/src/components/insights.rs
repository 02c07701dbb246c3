use crate::themes::Theme;
use medvisor_core::models::{Insight, InsightKind};
use ratatui::text::{Line, Span};

// ── InsightCard ──────────────────────────────────────────────────────────────

/// An advisory entry in the insights panel.
///
/// Renders as a title line tagged with kind and severity, the description,
/// and an indented action hint.
pub struct InsightCard<'a> {
    pub insight: &'a Insight,
    pub theme: &'a Theme,
}

impl<'a> InsightCard<'a> {
    pub fn new(insight: &'a Insight, theme: &'a Theme) -> Self {
        Self { insight, theme }
    }

    pub fn icon(&self) -> &'static str {
        match self.insight.kind {
            InsightKind::Anomaly => "⚠",
            InsightKind::Opportunity => "↗",
            InsightKind::Alert => "●",
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let severity = self.insight.severity;
        vec![
            Line::from(vec![
                Span::styled(format!("{} ", self.icon()), self.theme.severity_style(severity)),
                Span::styled(self.insight.title.as_str(), self.theme.bold),
                Span::styled(
                    format!("  [{}]", severity.label()),
                    self.theme.severity_style(severity),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {}", self.insight.description),
                self.theme.text,
            )),
            Line::from(Span::styled(
                format!("  → {}", self.insight.action),
                self.theme.info,
            )),
        ]
    }
}

/// Lines for a full panel: every card separated by a blank line.
pub fn insight_lines<'a>(insights: &'a [Insight], theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, insight) in insights.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(InsightCard::new(insight, theme).to_lines());
    }
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use medvisor_core::fallback;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_insight_card_lines() {
        let theme = Theme::dark();
        let insights = fallback::sample_insights();
        let card = InsightCard::new(&insights[0], &theme);
        let lines = card.to_lines();

        assert_eq!(lines.len(), 3);
        let title = text(&lines[0]);
        assert!(title.contains(&insights[0].title));
        assert!(title.ends_with(&format!("[{}]", insights[0].severity.label())));
        assert!(text(&lines[2]).contains(&insights[0].action));
    }

    #[test]
    fn test_insight_lines_separate_cards() {
        let theme = Theme::dark();
        let insights = fallback::sample_insights();
        let lines = insight_lines(&insights, &theme);
        assert_eq!(lines.len(), insights.len() * 3 + insights.len() - 1);
        assert!(text(&lines[3]).is_empty());
    }

    #[test]
    fn test_insight_lines_empty() {
        let theme = Theme::dark();
        assert!(insight_lines(&[], &theme).is_empty());
    }
}
