//! Denial trend and denial reason charts.
//!
//! Both charts are drawn as text bars inside a bordered [`Paragraph`] so they
//! stay legible on narrow terminals and in the classic theme.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use medvisor_core::formatting::format_locale;
use medvisor_core::models::{DenialReasonSlice, TrendPoint};

use crate::themes::Theme;

/// Widest bar either chart draws.
pub const BAR_WIDTH: usize = 24;

/// Bars never shrink below this, even if the line then clips.
pub const MIN_BAR_WIDTH: usize = 4;

/// Longest reason label shown before truncation.
const REASON_LABEL_WIDTH: usize = 18;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a `width`-character bar for `value` out of `max`.
///
/// Returns `(filled, empty)`; a non-positive `max` yields an empty bar.
pub fn build_bar(value: f64, max: f64, width: usize) -> (String, String) {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    ("█".repeat(filled), "░".repeat(empty))
}

/// Bar width that fits `available` columns next to `fixed` columns of text.
fn bar_width(available: usize, fixed: usize) -> usize {
    available
        .saturating_sub(fixed)
        .clamp(MIN_BAR_WIDTH, BAR_WIDTH)
}

/// Pad or truncate `label` to exactly `width` display columns.
fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return format!("{}{}", label, " ".repeat(width - label.width()));
    }
    let mut out = String::new();
    for ch in label.chars() {
        if out.width() + ch.to_string().width() + 1 > width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    let pad = width.saturating_sub(out.width());
    format!("{}{}", out, " ".repeat(pad))
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// One line per month: `"Jan ████░░ 12.5%  1,100 claims"`.
///
/// Bars are scaled against the highest denial rate in the series and sized
/// so each line fits in `width` columns.
pub fn trend_lines<'a>(points: &[TrendPoint], width: usize, theme: &'a Theme) -> Vec<Line<'a>> {
    if points.is_empty() {
        return vec![Line::from(Span::styled("No dated claims", theme.dim))];
    }

    let max = points
        .iter()
        .map(|p| p.denial_rate_percent)
        .fold(0.0_f64, f64::max);
    let label_width = points
        .iter()
        .map(|p| p.period_label.width())
        .max()
        .unwrap_or(3);
    let suffixes: Vec<String> = points
        .iter()
        .map(|p| format!("  {} claims", format_locale(p.total_claims as f64)))
        .collect();
    let suffix_width = suffixes.iter().map(|s| s.width()).max().unwrap_or(0);
    let bar = bar_width(width, label_width + 1 + 7 + suffix_width);

    points
        .iter()
        .zip(suffixes)
        .map(|(p, suffix)| {
            let (filled, empty) = build_bar(p.denial_rate_percent, max, bar);
            Line::from(vec![
                Span::styled(fit_label(&p.period_label, label_width), theme.label),
                Span::raw(" "),
                Span::styled(filled, theme.bar),
                Span::styled(empty, theme.dim),
                Span::styled(format!(" {:>5}%", p.denial_rate_percent), theme.value),
                Span::styled(suffix, theme.dim),
            ])
        })
        .collect()
}

/// One line per reason: `"Coding Error ███░░ 20% (28)"`.
///
/// Bars are scaled against 100 % so slices compare across uploads, and
/// sized so each line fits in `width` columns.
pub fn reason_lines<'a>(
    reasons: &[DenialReasonSlice],
    width: usize,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    if reasons.is_empty() {
        return vec![Line::from(Span::styled("No denied claims", theme.dim))];
    }

    let count_width = reasons
        .iter()
        .map(|r| format!(" ({})", r.count).width())
        .max()
        .unwrap_or(0);
    let bar = bar_width(width, 2 + REASON_LABEL_WIDTH + 1 + 5 + count_width);

    reasons
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let (filled, empty) = build_bar(slice.percentage_percent as f64, 100.0, bar);
            Line::from(vec![
                Span::styled("■ ", theme.slice_style(i)),
                Span::styled(fit_label(&slice.reason, REASON_LABEL_WIDTH), theme.text),
                Span::raw(" "),
                Span::styled(filled, theme.slice_style(i)),
                Span::styled(empty, theme.dim),
                Span::styled(format!(" {:>3}%", slice.percentage_percent), theme.value),
                Span::styled(format!(" ({})", slice.count), theme.dim),
            ])
        })
        .collect()
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the trend chart and the reasons breakdown side by side.
pub fn render_charts(
    frame: &mut Frame,
    area: Rect,
    trend: &[TrendPoint],
    reasons: &[DenialReasonSlice],
    theme: &Theme,
) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let trend_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border)
        .title(" Denial Rate Trend ");
    let inner_width = |area: Rect| area.width.saturating_sub(2) as usize;
    frame.render_widget(
        Paragraph::new(Text::from(trend_lines(trend, inner_width(halves[0]), theme)))
            .block(trend_block),
        halves[0],
    );

    let reasons_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border)
        .title(" Top Denial Reasons ");
    frame.render_widget(
        Paragraph::new(Text::from(reason_lines(reasons, inner_width(halves[1]), theme)))
            .block(reasons_block),
        halves[1],
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
