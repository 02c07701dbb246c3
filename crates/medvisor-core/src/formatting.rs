use crate::models::{ChangeType, MetricChange};

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use medvisor_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a number the way an `en-US` locale renders it: thousands
/// separators and at most three fraction digits, trailing zeros dropped.
///
/// # Examples
///
/// ```
/// use medvisor_core::formatting::format_locale;
///
/// assert_eq!(format_locale(145000.0), "145,000");
/// assert_eq!(format_locale(2450.5), "2,450.5");
/// assert_eq!(format_locale(0.0), "0");
/// ```
pub fn format_locale(value: f64) -> String {
    let fixed = format_number(value, 3);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Render a period-over-period change as a signed percentage.
///
/// # Examples
///
/// ```
/// use medvisor_core::formatting::format_change;
/// use medvisor_core::models::MetricChange;
///
/// assert_eq!(format_change(&MetricChange::increase(2.3)), "+2.3%");
/// assert_eq!(format_change(&MetricChange::decrease(1.2)), "-1.2%");
/// assert_eq!(format_change(&MetricChange::flat()), "+0%");
/// ```
pub fn format_change(change: &MetricChange) -> String {
    let sign = match change.change_type {
        ChangeType::Increase => '+',
        ChangeType::Decrease => '-',
    };
    format!("{}{}%", sign, change.value.abs())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_locale ────────────────────────────────────────────────────────

    #[test]
    fn test_format_locale_whole_numbers() {
        assert_eq!(format_locale(1_247.0), "1,247");
        assert_eq!(format_locale(132_000.0), "132,000");
        assert_eq!(format_locale(5.0), "5");
    }

    #[test]
    fn test_format_locale_fractions() {
        assert_eq!(format_locale(2_450.25), "2,450.25");
        assert_eq!(format_locale(0.1234), "0.123");
    }

    #[test]
    fn test_format_locale_does_not_trim_integer_zeros() {
        assert_eq!(format_locale(100.0), "100");
        assert_eq!(format_locale(1_000_000.0), "1,000,000");
    }

    // ── format_change ────────────────────────────────────────────────────────

    #[test]
    fn test_format_change_sign_follows_type() {
        assert_eq!(format_change(&MetricChange::increase(8.9)), "+8.9%");
        assert_eq!(format_change(&MetricChange::decrease(2.1)), "-2.1%");
    }
}
