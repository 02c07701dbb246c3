use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Marker placed either side of the application title.
pub const TITLE_MARK: &str = "✚";

/// Dashboard header rendering three lines:
///
/// 1. Application title (ALL CAPS) with the data-source badge.
/// 2. A 60-column `=` separator.
/// 3. An empty line.
pub struct Header<'a> {
    /// Name of the loaded claims file, `None` while sample data is shown.
    pub source: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { source, theme }
    }

    /// `"[ claims.csv ]"` for uploaded data, `"[ sample data ]"` otherwise.
    pub fn badge(&self) -> String {
        format!("[ {} ]", self.source.unwrap_or("sample data"))
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let badge_style = if self.source.is_some() {
            self.theme.success
        } else {
            self.theme.warning
        };

        vec![
            Line::from(vec![
                Span::styled(TITLE_MARK, self.theme.header_accent),
                Span::styled(" MEDVISOR DASHBOARD ", self.theme.header),
                Span::styled(TITLE_MARK, self.theme.header_accent),
                Span::raw("  "),
                Span::styled(self.badge(), badge_style),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        assert_eq!(Header::new(None, &theme).to_lines().len(), 3);
    }

    #[test]
    fn test_header_title_and_sample_badge() {
        let theme = Theme::dark();
        let lines = Header::new(None, &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains("MEDVISOR DASHBOARD"), "got: {title}");
        assert!(title.ends_with("[ sample data ]"), "got: {title}");
        assert_eq!(lines[0].spans[4].style, theme.warning);
    }

    #[test]
    fn test_header_source_badge() {
        let theme = Theme::dark();
        let lines = Header::new(Some("claims.csv"), &theme).to_lines();
        assert!(text(&lines[0]).ends_with("[ claims.csv ]"));
        assert_eq!(lines[0].spans[4].style, theme.success);
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let sep = text(&Header::new(None, &theme).to_lines()[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }
}
