use ratatui::style::{Color, Modifier, Style};

use medvisor_core::models::{ChangeType, ClaimStatus, KpiVariant, Severity};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by the dashboard
/// widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── KPI cards ────────────────────────────────────────────────────────────
    pub card_border: Style,
    pub change_up: Style,
    pub change_down: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub bar: Style,
    pub bar_value: Style,
    /// Cycled through for the denial-reason slices.
    pub slices: [Style; 5],

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Footer / prompt ──────────────────────────────────────────────────────
    pub prompt: Style,
    pub notification_info: Style,
    pub notification_error: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            change_up: Style::default().fg(Color::Green),
            change_down: Style::default().fg(Color::Red),

            bar: Style::default().fg(Color::Red),
            bar_value: Style::default().fg(Color::White).bg(Color::Red),
            slices: [
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Blue),
            ],

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            prompt: Style::default().fg(Color::Yellow),
            notification_info: Style::default().fg(Color::Cyan),
            notification_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::Gray),
            change_up: Style::default().fg(Color::Green),
            change_down: Style::default().fg(Color::Red),

            bar: Style::default().fg(Color::Red),
            bar_value: Style::default().fg(Color::White).bg(Color::Red),
            slices: [
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Green),
                Style::default().fg(Color::DarkGray),
            ],

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            prompt: Style::default().fg(Color::Magenta),
            notification_info: Style::default().fg(Color::Blue),
            notification_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to keep output plain on minimal terminal
    /// emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            change_up: Style::default().fg(Color::Green),
            change_down: Style::default().fg(Color::Red),

            bar: Style::default().fg(Color::Red),
            bar_value: Style::default().fg(Color::White),
            slices: [
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Blue),
            ],

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            tab_active: Style::default().fg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::DarkGray),

            prompt: Style::default().fg(Color::Yellow),
            notification_info: Style::default().fg(Color::Cyan),
            notification_error: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Value style of a KPI card with the given emphasis.
    pub fn kpi_style(&self, variant: KpiVariant) -> Style {
        match variant {
            KpiVariant::Default => self.value,
            KpiVariant::Success => self.value.patch(self.success),
            KpiVariant::Warning => self.value.patch(self.warning),
            KpiVariant::Destructive => self.value.patch(self.error),
        }
    }

    pub fn change_style(&self, change_type: ChangeType) -> Style {
        match change_type {
            ChangeType::Increase => self.change_up,
            ChangeType::Decrease => self.change_down,
        }
    }

    /// Badge colour for a claim status cell.  Unknown statuses render plain.
    pub fn status_style(&self, status: &ClaimStatus) -> Style {
        match status {
            ClaimStatus::Paid => self.success,
            ClaimStatus::Denied => self.error,
            ClaimStatus::Pending => self.warning,
            ClaimStatus::Submitted => self.info,
            ClaimStatus::Other(_) => self.text,
        }
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::High => self.error,
            Severity::Medium => self.warning,
            Severity::Low => self.success,
        }
    }

    /// Colour of the `index`-th denial-reason slice, cycling when exhausted.
    pub fn slice_style(&self, index: usize) -> Style {
        self.slices[index % self.slices.len()]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.success.fg, Some(Color::Green));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert_eq!(t.bar.fg, Some(Color::Red));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_creation() {
        let t = Theme::classic();
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.tab_active.add_modifier.contains(Modifier::BOLD));
        // Classic notification_error must NOT have BOLD (unlike dark/light).
        assert!(!t.notification_error.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        let classic = Theme::from_name("classic");
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    #[test]
    fn test_kpi_style_by_variant() {
        let t = Theme::dark();
        assert_eq!(t.kpi_style(KpiVariant::Success).fg, Some(Color::Green));
        assert_eq!(t.kpi_style(KpiVariant::Warning).fg, Some(Color::Yellow));
        assert_eq!(t.kpi_style(KpiVariant::Destructive).fg, Some(Color::Red));
        assert_eq!(t.kpi_style(KpiVariant::Default).fg, Some(Color::White));
        assert!(t
            .kpi_style(KpiVariant::Success)
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_change_style() {
        let t = Theme::dark();
        assert_eq!(t.change_style(ChangeType::Increase).fg, Some(Color::Green));
        assert_eq!(t.change_style(ChangeType::Decrease).fg, Some(Color::Red));
    }

    #[test]
    fn test_status_style() {
        let t = Theme::dark();
        assert_eq!(t.status_style(&ClaimStatus::Paid).fg, Some(Color::Green));
        assert_eq!(t.status_style(&ClaimStatus::Denied).fg, Some(Color::Red));
        assert_eq!(t.status_style(&ClaimStatus::Pending).fg, Some(Color::Yellow));
        assert_eq!(t.status_style(&ClaimStatus::Submitted).fg, Some(Color::Cyan));
        assert_eq!(
            t.status_style(&ClaimStatus::Other("Appealed".into())).fg,
            Some(Color::White)
        );
    }

    #[test]
    fn test_severity_style() {
        let t = Theme::dark();
        assert_eq!(t.severity_style(Severity::High).fg, Some(Color::Red));
        assert_eq!(t.severity_style(Severity::Medium).fg, Some(Color::Yellow));
        assert_eq!(t.severity_style(Severity::Low).fg, Some(Color::Green));
    }

    #[test]
    fn test_slice_style_cycles() {
        let t = Theme::dark();
        assert_eq!(t.slice_style(0), t.slice_style(5));
        assert_ne!(t.slice_style(0), t.slice_style(1));
    }
}
