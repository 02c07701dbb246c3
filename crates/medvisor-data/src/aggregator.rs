//! KPI, denial-trend and denial-reason aggregation over claim records.
//!
//! Every function here is pure: it reads the full record slice, never fails,
//! and returns a fresh value.  Malformed fields degrade to `0`, to
//! "excluded", or to the `"Unknown Reason"` label.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use medvisor_core::calculations::{change_of, ratio_percent, round1};
use medvisor_core::fallback;
use medvisor_core::models::{
    ClaimRecord, DenialReasonSlice, KpiMetric, KpiSet, MetricChange, TrendPoint,
};
use medvisor_core::time_utils::{month_label, PeriodWindows};

/// Maximum number of slices in the denial-reason breakdown.
pub const TOP_REASONS: usize = 5;

// ── PeriodStats ───────────────────────────────────────────────────────────────

/// Claim counts and billed totals accumulated over one comparison window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodStats {
    pub total_claims: u64,
    pub paid_claims: u64,
    pub denied_claims: u64,
    pub gross_charges: f64,
    pub payments_received: f64,
}

impl PeriodStats {
    /// Add a single record's figures to the running totals.
    pub fn add_record(&mut self, record: &ClaimRecord) {
        let amount = record.billed_amount();
        self.total_claims += 1;
        self.gross_charges += amount;
        if record.is_paid() {
            self.paid_claims += 1;
            self.payments_received += amount;
        }
        if record.is_denied() {
            self.denied_claims += 1;
        }
    }

    pub fn net_collection_rate(&self) -> f64 {
        ratio_percent(self.payments_received, self.gross_charges)
    }

    pub fn denial_rate(&self) -> f64 {
        ratio_percent(self.denied_claims as f64, self.total_claims as f64)
    }

    pub fn first_pass_rate(&self) -> f64 {
        ratio_percent(self.paid_claims as f64, self.total_claims as f64)
    }
}

// ── ClaimsAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that derives dashboard view-models from claim records.
pub struct ClaimsAggregator;

impl ClaimsAggregator {
    /// Compute the seven headline KPIs for the 30 days ending at `now`,
    /// each compared against the 30 days before that.
    ///
    /// A/R days are averaged over the whole input rather than the current
    /// window, and carry a flat change since there is no history for them.
    ///
    /// An empty `records` slice yields the sample KPI set unchanged.
    pub fn compute_kpis(records: &[ClaimRecord], now: DateTime<Utc>) -> KpiSet {
        if records.is_empty() {
            return fallback::sample_kpis();
        }

        let (current, previous) = Self::partition_periods(records, now);
        let ar_days = Self::average_ar_days(records);

        debug!(
            "KPI windows: {} current, {} previous of {} records",
            current.total_claims,
            previous.total_claims,
            records.len()
        );

        let rate = |cur: f64, prev: f64| KpiMetric::new(round1(cur), change_of(cur, prev));
        let whole = |cur: f64, prev: f64| KpiMetric::new(cur.round(), change_of(cur, prev));

        KpiSet {
            ncr: rate(current.net_collection_rate(), previous.net_collection_rate()),
            denial_rate: rate(current.denial_rate(), previous.denial_rate()),
            gross_charges: whole(current.gross_charges, previous.gross_charges),
            payments_received: whole(current.payments_received, previous.payments_received),
            first_pass_rate: rate(current.first_pass_rate(), previous.first_pass_rate()),
            ar_days: KpiMetric::new(ar_days.round(), MetricChange::flat()),
            total_claims: whole(current.total_claims as f64, previous.total_claims as f64),
        }
    }

    /// Compute the denial rate per month label.
    ///
    /// Points appear in the order each month is first seen while scanning
    /// `records`, not in calendar order.  Records without a parsable date
    /// are skipped.  An empty slice yields the sample trend.
    pub fn compute_denial_trend(records: &[ClaimRecord]) -> Vec<TrendPoint> {
        if records.is_empty() {
            return fallback::sample_denial_trend();
        }

        // (label, total, denied) in first-appearance order.
        let mut groups: Vec<(String, u64, u64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut undated = 0usize;

        for record in records {
            let Some(date) = record.service_date() else {
                undated += 1;
                continue;
            };
            let label = month_label(date);
            let slot = *index.entry(label.clone()).or_insert_with(|| {
                groups.push((label, 0, 0));
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.1 += 1;
            if record.is_denied() {
                group.2 += 1;
            }
        }

        if undated > 0 {
            warn!("{} of {} records have no parsable date of service", undated, records.len());
        }

        groups
            .into_iter()
            .map(|(period_label, total, denied)| TrendPoint {
                period_label,
                denial_rate_percent: round1(ratio_percent(denied as f64, total as f64)),
                total_claims: total,
            })
            .collect()
    }

    /// Rank denial reasons of denied claims by frequency, keeping the top 5.
    ///
    /// Ties keep the order in which each reason first appeared.  When no
    /// record is denied the sample breakdown is returned.
    pub fn compute_denial_reasons(records: &[ClaimRecord]) -> Vec<DenialReasonSlice> {
        let mut counts: Vec<(&str, u64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut total_denied: u64 = 0;

        for record in records.iter().filter(|r| r.is_denied()) {
            total_denied += 1;
            let reason = record.denial_reason_or_default();
            if let Some(&slot) = index.get(reason) {
                counts[slot].1 += 1;
                continue;
            }
            index.insert(reason, counts.len());
            counts.push((reason, 1));
        }

        if total_denied == 0 {
            return fallback::sample_denial_reasons();
        }

        // `sort_by` is stable, so equal counts keep first-appearance order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_REASONS);

        debug!(
            "{} denied claims across {} reasons",
            total_denied,
            index.len()
        );

        counts
            .into_iter()
            .map(|(reason, count)| DenialReasonSlice {
                reason: reason.to_string(),
                count,
                percentage_percent: (count as f64 / total_denied as f64 * 100.0).round() as u32,
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Split records into current- and previous-window stats.
    fn partition_periods(
        records: &[ClaimRecord],
        now: DateTime<Utc>,
    ) -> (PeriodStats, PeriodStats) {
        let windows = PeriodWindows::ending_at(now);
        let mut current = PeriodStats::default();
        let mut previous = PeriodStats::default();

        for record in records {
            let Some(date) = record.service_date() else {
                continue;
            };
            if windows.in_current(date) {
                current.add_record(record);
            } else if windows.in_previous(date) {
                previous.add_record(record);
            }
        }

        (current, previous)
    }

    /// Mean of positive `daysOutstanding` values, `0.0` when there are none.
    fn average_ar_days(records: &[ClaimRecord]) -> f64 {
        let (sum, count) = records
            .iter()
            .filter_map(ClaimRecord::days_outstanding)
            .filter(|&days| days > 0)
            .fold((0.0_f64, 0u64), |(sum, count), days| (sum + days as f64, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use medvisor_core::models::{ChangeType, UNKNOWN_DENIAL_REASON};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    fn claim(status: &str, amount: &str, date: &str) -> ClaimRecord {
        ClaimRecord {
            status: Some(status.to_string()),
            billed_amount: Some(amount.to_string()),
            date_of_service: Some(date.to_string()),
            ..Default::default()
        }
    }

    fn denied(reason: Option<&str>) -> ClaimRecord {
        ClaimRecord {
            status: Some("Denied".to_string()),
            denial_reason: reason.map(str::to_string),
            ..Default::default()
        }
    }

    // ── compute_kpis ──────────────────────────────────────────────────────────

    #[test]
    fn test_kpis_empty_input_is_sample_snapshot() {
        assert_eq!(ClaimsAggregator::compute_kpis(&[], now()), fallback::SAMPLE_KPIS);
        let later = now() + Duration::days(400);
        assert_eq!(ClaimsAggregator::compute_kpis(&[], later), fallback::SAMPLE_KPIS);
    }

    #[test]
    fn test_kpis_denied_and_paid_scenario() {
        let t0 = days_ago(1);
        let records = vec![claim("Denied", "100", &t0), claim("Paid", "200", &t0)];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());

        assert_eq!(kpis.denial_rate.value, 50.0);
        assert_eq!(kpis.ncr.value, 66.7);
        assert_eq!(kpis.first_pass_rate.value, 50.0);
        assert_eq!(kpis.gross_charges.value, 300.0);
        assert_eq!(kpis.payments_received.value, 200.0);
        assert_eq!(kpis.total_claims.value, 2.0);
        // No prior-period records: every change is flat.
        assert_eq!(kpis.ncr.change, MetricChange::flat());
        assert_eq!(kpis.total_claims.change, MetricChange::flat());
    }

    #[test]
    fn test_kpis_total_claims_counts_current_window_only() {
        let records = vec![
            claim("Paid", "10", &days_ago(0)),
            claim("Paid", "10", &days_ago(29)),
            claim("Paid", "10", &days_ago(31)),
            claim("Paid", "10", &days_ago(90)),
            claim("Paid", "10", "not a date"),
            claim("Paid", "10", &(now() + Duration::days(2)).format("%Y-%m-%d").to_string()),
        ];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.total_claims.value, 2.0);
    }

    #[test]
    fn test_kpis_period_over_period_change() {
        let records = vec![
            // current: 3 claims, 1 denied
            claim("Denied", "100", &days_ago(2)),
            claim("Paid", "100", &days_ago(3)),
            claim("Paid", "100", &days_ago(4)),
            // previous: 2 claims, 1 denied
            claim("Denied", "100", &days_ago(40)),
            claim("Paid", "100", &days_ago(45)),
        ];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());

        // 3 vs 2 claims → +50 %
        assert_eq!(kpis.total_claims.change, MetricChange::increase(50.0));
        // 33.3 % vs 50 % denial rate → -33.3 %
        assert_eq!(kpis.denial_rate.value, 33.3);
        assert_eq!(kpis.denial_rate.change.change_type, ChangeType::Decrease);
        assert_eq!(kpis.denial_rate.change.value, 33.3);
        // gross 300 vs 200 → +50 %
        assert_eq!(kpis.gross_charges.change, MetricChange::increase(50.0));
    }

    #[test]
    fn test_kpis_records_outside_windows_give_zeros() {
        let records = vec![claim("Paid", "500", &days_ago(200))];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.total_claims.value, 0.0);
        assert_eq!(kpis.ncr.value, 0.0);
        assert_eq!(kpis.denial_rate.value, 0.0);
        assert_eq!(kpis.gross_charges.value, 0.0);
    }

    #[test]
    fn test_kpis_ar_days_excludes_non_positive_and_absent() {
        let mut a = claim("Pending", "0", &days_ago(1));
        a.days_outstanding = Some("30".to_string());
        let mut b = claim("Pending", "0", &days_ago(300));
        b.days_outstanding = Some("61".to_string());
        let mut c = claim("Pending", "0", &days_ago(1));
        c.days_outstanding = Some("-5".to_string());
        let d = claim("Pending", "0", &days_ago(1));

        let kpis = ClaimsAggregator::compute_kpis(&[a, b, c, d], now());
        // (30 + 61) / 2 = 45.5 → 46; covers records outside the window too.
        assert_eq!(kpis.ar_days.value, 46.0);
        assert_eq!(kpis.ar_days.change, MetricChange::flat());
    }

    #[test]
    fn test_kpis_ar_days_zero_without_outstanding_records() {
        let records = vec![claim("Paid", "10", &days_ago(1))];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.ar_days.value, 0.0);
    }

    #[test]
    fn test_kpis_malformed_fields_degrade_without_error() {
        let records = vec![
            ClaimRecord::default(),
            claim("Paid", "abc", &days_ago(1)),
            claim("???", "", &days_ago(1)),
        ];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.total_claims.value, 2.0);
        assert_eq!(kpis.gross_charges.value, 0.0);
        assert_eq!(kpis.ncr.value, 0.0);
        assert_eq!(kpis.first_pass_rate.value, 50.0);
    }

    #[test]
    fn test_kpis_ar_days_huge_values_do_not_overflow() {
        let mut a = claim("Pending", "0", &days_ago(1));
        a.days_outstanding = Some(i64::MAX.to_string());
        let mut b = claim("Pending", "0", &days_ago(1));
        b.days_outstanding = Some("5".to_string());
        let mut c = claim("Pending", "0", &days_ago(1));
        c.days_outstanding = Some("1e19".to_string());

        let kpis = ClaimsAggregator::compute_kpis(&[a, b, c], now());
        assert!(kpis.ar_days.value.is_finite());
        assert!(kpis.ar_days.value > 1e18);
    }

    #[test]
    fn test_kpis_malformed_days_outstanding_keeps_record_in_window() {
        let mut a = claim("Paid", "100", &days_ago(1));
        a.days_outstanding = Some("abc".to_string());
        let mut b = claim("Paid", "100", &days_ago(2));
        b.days_outstanding = Some("40".to_string());

        let kpis = ClaimsAggregator::compute_kpis(&[a, b], now());
        assert_eq!(kpis.total_claims.value, 2.0);
        assert_eq!(kpis.gross_charges.value, 200.0);
        assert_eq!(kpis.ar_days.value, 40.0);
    }

    #[test]
    fn test_kpis_window_boundary_belongs_to_current_period() {
        let boundary = now() - Duration::days(30);
        let just_before = boundary - Duration::seconds(1);
        let records = vec![
            claim("Denied", "100", &boundary.to_rfc3339()),
            claim("Paid", "100", &just_before.to_rfc3339()),
        ];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());

        assert_eq!(kpis.total_claims.value, 1.0);
        assert_eq!(kpis.denial_rate.value, 100.0);
        assert_eq!(kpis.first_pass_rate.value, 0.0);
        // one claim in each window
        assert_eq!(kpis.total_claims.change, MetricChange::increase(0.0));
    }

    #[test]
    fn test_kpis_non_positive_gross_gives_zero_ncr() {
        let records = vec![
            claim("Paid", "100", &days_ago(1)),
            claim("Denied", "-150", &days_ago(1)),
        ];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.gross_charges.value, -50.0);
        assert_eq!(kpis.ncr.value, 0.0);
    }

    #[test]
    fn test_kpis_money_rounded_to_whole_dollars() {
        let records = vec![claim("Paid", "100.6", &days_ago(1))];
        let kpis = ClaimsAggregator::compute_kpis(&records, now());
        assert_eq!(kpis.gross_charges.value, 101.0);
        assert_eq!(kpis.payments_received.value, 101.0);
        assert_eq!(kpis.ncr.value, 100.0);
    }

    // ── compute_denial_trend ──────────────────────────────────────────────────

    #[test]
    fn test_trend_empty_input_is_sample_series() {
        assert_eq!(
            ClaimsAggregator::compute_denial_trend(&[]),
            fallback::sample_denial_trend()
        );
    }

    #[test]
    fn test_trend_first_appearance_order() {
        let records = vec![
            claim("Paid", "1", "2024-03-10"),
            claim("Denied", "1", "2024-01-05"),
        ];
        let trend = ClaimsAggregator::compute_denial_trend(&records);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].period_label, "Mar");
        assert_eq!(trend[0].total_claims, 1);
        assert_eq!(trend[0].denial_rate_percent, 0.0);
        assert_eq!(trend[1].period_label, "Jan");
        assert_eq!(trend[1].total_claims, 1);
        assert_eq!(trend[1].denial_rate_percent, 100.0);
    }

    #[test]
    fn test_trend_groups_same_month_label_across_years() {
        let records = vec![
            claim("Denied", "1", "2023-02-01"),
            claim("Paid", "1", "2024-02-01"),
            claim("Paid", "1", "2024-02-15"),
        ];
        let trend = ClaimsAggregator::compute_denial_trend(&records);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].total_claims, 3);
        assert_eq!(trend[0].denial_rate_percent, 33.3);
    }

    #[test]
    fn test_trend_drops_unparsable_dates() {
        let records = vec![claim("Denied", "1", "garbage"), ClaimRecord::default()];
        assert!(ClaimsAggregator::compute_denial_trend(&records).is_empty());
    }

    // ── compute_denial_reasons ────────────────────────────────────────────────

    #[test]
    fn test_reasons_no_denials_is_sample_breakdown() {
        let records = vec![claim("Paid", "1", "2024-01-01")];
        assert_eq!(
            ClaimsAggregator::compute_denial_reasons(&records),
            fallback::sample_denial_reasons()
        );
        assert_eq!(
            ClaimsAggregator::compute_denial_reasons(&[]),
            fallback::sample_denial_reasons()
        );
    }

    #[test]
    fn test_reasons_default_label_for_missing_reason() {
        let records = vec![denied(None), denied(Some("")), denied(Some("Coding Error"))];
        let reasons = ClaimsAggregator::compute_denial_reasons(&records);

        assert_eq!(reasons[0].reason, UNKNOWN_DENIAL_REASON);
        assert_eq!(reasons[0].count, 2);
        assert_eq!(reasons[0].percentage_percent, 67);
        assert_eq!(reasons[1].reason, "Coding Error");
        assert_eq!(reasons[1].percentage_percent, 33);
    }

    #[test]
    fn test_reasons_sorted_desc_with_stable_ties_and_top_five() {
        let mut records = Vec::new();
        for (reason, n) in [("A", 1), ("B", 3), ("C", 1), ("D", 2), ("E", 1), ("F", 1)] {
            records.extend(std::iter::repeat_with(|| denied(Some(reason))).take(n));
        }
        let reasons = ClaimsAggregator::compute_denial_reasons(&records);
        let names: Vec<&str> = reasons.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C", "E"]);
    }

    #[test]
    fn test_reasons_deterministic() {
        let records = vec![
            denied(Some("X")),
            denied(Some("Y")),
            denied(Some("X")),
            denied(Some("Z")),
        ];
        assert_eq!(
            ClaimsAggregator::compute_denial_reasons(&records),
            ClaimsAggregator::compute_denial_reasons(&records)
        );
    }

    #[test]
    fn test_reasons_percentages_near_100() {
        let records = vec![
            denied(Some("X")),
            denied(Some("Y")),
            denied(Some("Z")),
        ];
        let reasons = ClaimsAggregator::compute_denial_reasons(&records);
        let sum: u32 = reasons.iter().map(|r| r.percentage_percent).sum();
        assert!(sum <= 100);
        assert!(100 - sum < reasons.len() as u32);
    }

    #[test]
    fn test_reasons_ignore_non_denied_records() {
        let mut paid = claim("Paid", "1", "2024-01-01");
        paid.denial_reason = Some("Should Not Count".to_string());
        let records = vec![paid, denied(Some("Real"))];
        let reasons = ClaimsAggregator::compute_denial_reasons(&records);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].reason, "Real");
        assert_eq!(reasons[0].percentage_percent, 100);
    }
}
