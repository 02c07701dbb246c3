//! Rounding and period-over-period arithmetic shared by the KPI aggregator.

use crate::models::{ChangeType, MetricChange};

/// Round to one decimal place (half away from zero).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `(part / whole) * 100`, or `0.0` unless `whole` is positive.
///
/// The result is not rounded, so period-over-period changes are computed
/// from exact ratios.
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Relative change from `previous` to `current`, as an absolute percentage
/// rounded to one decimal plus a direction.
///
/// A zero `previous` value has no basis for comparison and yields
/// [`MetricChange::flat`] regardless of `current`.
pub fn change_of(current: f64, previous: f64) -> MetricChange {
    if previous == 0.0 {
        return MetricChange::flat();
    }
    let delta = (current - previous) / previous * 100.0;
    MetricChange {
        value: round1(delta.abs()),
        change_type: if delta >= 0.0 {
            ChangeType::Increase
        } else {
            ChangeType::Decrease
        },
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666_666), 66.7);
        assert_eq!(round1(50.0), 50.0);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round1(8.75), 8.8);
    }

    #[test]
    fn test_ratio_percent_zero_whole() {
        assert_eq!(ratio_percent(5.0, 0.0), 0.0);
        assert_eq!(ratio_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_ratio_percent_negative_whole() {
        assert_eq!(ratio_percent(100.0, -50.0), 0.0);
    }

    #[test]
    fn test_ratio_percent_exact() {
        assert!((ratio_percent(200.0, 300.0) - 66.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_change_of_zero_previous_is_flat() {
        for current in [0.0, 1.0, 250.0, -3.0] {
            assert_eq!(change_of(current, 0.0), MetricChange::flat());
        }
    }

    #[test]
    fn test_change_of_increase() {
        let c = change_of(120.0, 100.0);
        assert_eq!(c.change_type, ChangeType::Increase);
        assert_eq!(c.value, 20.0);
    }

    #[test]
    fn test_change_of_decrease_reports_absolute_value() {
        let c = change_of(75.0, 100.0);
        assert_eq!(c.change_type, ChangeType::Decrease);
        assert_eq!(c.value, 25.0);
    }

    #[test]
    fn test_change_of_no_change_is_increase() {
        let c = change_of(42.0, 42.0);
        assert_eq!(c, MetricChange::increase(0.0));
    }

    #[test]
    fn test_change_of_rounds_to_one_decimal() {
        // (2 - 3) / 3 = -33.333…%
        let c = change_of(2.0, 3.0);
        assert_eq!(c, MetricChange::decrease(33.3));
    }
}
