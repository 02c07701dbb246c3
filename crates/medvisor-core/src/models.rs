use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formatting;
use crate::time_utils;

/// Reason recorded for denied claims that carry no `denialReason` value.
pub const UNKNOWN_DENIAL_REASON: &str = "Unknown Reason";

// ── ClaimStatus ───────────────────────────────────────────────────────────────

/// Adjudication status of a claim.
///
/// The set is open: any value other than the four known statuses is kept
/// verbatim in [`ClaimStatus::Other`] and matches no aggregation bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    Paid,
    Denied,
    Pending,
    Submitted,
    Other(String),
}

impl ClaimStatus {
    /// Classify a raw status string.  Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Paid" => Self::Paid,
            "Denied" => Self::Denied,
            "Pending" => Self::Pending,
            "Submitted" => Self::Submitted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "Paid",
            Self::Denied => "Denied",
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ClaimRecord ───────────────────────────────────────────────────────────────

/// A single claim row as produced by the CSV reader.
///
/// Every field holds the raw cell text (or `None` when the cell is empty or
/// the column is absent).  Typed access goes through the coercion accessors,
/// which never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(rename = "claim_id", default)]
    pub claim_id: Option<String>,
    #[serde(rename = "patientName", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "dateOfService", default)]
    pub date_of_service: Option<String>,
    #[serde(rename = "billedamount", default)]
    pub billed_amount: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(rename = "daysOutstanding", default)]
    pub days_outstanding: Option<String>,
    #[serde(rename = "denialReason", default)]
    pub denial_reason: Option<String>,
}

impl ClaimRecord {
    /// Parsed date of service, `None` when missing or unparsable.
    pub fn service_date(&self) -> Option<DateTime<Utc>> {
        self.date_of_service
            .as_deref()
            .and_then(time_utils::parse_service_date)
    }

    /// Billed amount; missing, non-numeric and non-finite values are `0.0`.
    pub fn billed_amount(&self) -> f64 {
        self.billed_amount
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Claim status; a missing status is an empty [`ClaimStatus::Other`].
    pub fn status(&self) -> ClaimStatus {
        ClaimStatus::parse(self.status.as_deref().unwrap_or(""))
    }

    pub fn is_paid(&self) -> bool {
        self.status() == ClaimStatus::Paid
    }

    pub fn is_denied(&self) -> bool {
        self.status() == ClaimStatus::Denied
    }

    /// Days the claim balance has been outstanding.
    ///
    /// Accepts integer text or decimal text (truncated toward zero).
    pub fn days_outstanding(&self) -> Option<i64> {
        let raw = self.days_outstanding.as_deref()?.trim();
        if let Ok(days) = raw.parse::<i64>() {
            return Some(days);
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    }

    /// Denial reason, or [`UNKNOWN_DENIAL_REASON`] when absent or empty.
    pub fn denial_reason_or_default(&self) -> &str {
        match self.denial_reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason,
            _ => UNKNOWN_DENIAL_REASON,
        }
    }

    /// All present field values, in column order.  Used for free-text search.
    pub fn field_values(&self) -> impl Iterator<Item = &str> {
        [
            &self.claim_id,
            &self.patient_name,
            &self.date_of_service,
            &self.billed_amount,
            &self.payer,
            &self.status,
            &self.provider,
            &self.days_outstanding,
            &self.denial_reason,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
    }
}

// ── KPI values ────────────────────────────────────────────────────────────────

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

/// Period-over-period change, as an absolute percentage plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub value: f64,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
}

impl MetricChange {
    /// The "no basis for comparison" change: `0 %`, increase.
    pub const fn flat() -> Self {
        Self {
            value: 0.0,
            change_type: ChangeType::Increase,
        }
    }

    pub const fn increase(value: f64) -> Self {
        Self {
            value,
            change_type: ChangeType::Increase,
        }
    }

    pub const fn decrease(value: f64) -> Self {
        Self {
            value,
            change_type: ChangeType::Decrease,
        }
    }
}

/// A headline metric value with its change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub value: f64,
    pub change: MetricChange,
}

impl KpiMetric {
    pub const fn new(value: f64, change: MetricChange) -> Self {
        Self { value, change }
    }
}

/// The seven headline KPIs shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    /// Net collection rate, percent (1 decimal).
    pub ncr: KpiMetric,
    /// Denial rate, percent (1 decimal).
    pub denial_rate: KpiMetric,
    /// Sum of billed amounts in the current period (whole dollars).
    pub gross_charges: KpiMetric,
    /// Sum of billed amounts of paid claims in the current period (whole dollars).
    pub payments_received: KpiMetric,
    /// First pass rate, percent (1 decimal).
    pub first_pass_rate: KpiMetric,
    /// Average days outstanding across the whole dataset (whole days).
    pub ar_days: KpiMetric,
    /// Claims in the current period.
    pub total_claims: KpiMetric,
}

impl KpiSet {
    pub fn metric(&self, kind: KpiKind) -> &KpiMetric {
        match kind {
            KpiKind::NetCollectionRate => &self.ncr,
            KpiKind::DenialRate => &self.denial_rate,
            KpiKind::GrossCharges => &self.gross_charges,
            KpiKind::ArDays => &self.ar_days,
            KpiKind::PaymentsReceived => &self.payments_received,
            KpiKind::FirstPassRate => &self.first_pass_rate,
            KpiKind::TotalClaims => &self.total_claims,
        }
    }
}

/// Visual emphasis of a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiVariant {
    Default,
    Success,
    Warning,
    Destructive,
}

/// Identifies one KPI card, its title, emphasis and value formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiKind {
    NetCollectionRate,
    DenialRate,
    GrossCharges,
    ArDays,
    PaymentsReceived,
    FirstPassRate,
    TotalClaims,
}

impl KpiKind {
    /// First card row.
    pub const PRIMARY: [KpiKind; 4] = [
        KpiKind::NetCollectionRate,
        KpiKind::DenialRate,
        KpiKind::GrossCharges,
        KpiKind::ArDays,
    ];

    /// Second card row.
    pub const SECONDARY: [KpiKind; 3] = [
        KpiKind::PaymentsReceived,
        KpiKind::FirstPassRate,
        KpiKind::TotalClaims,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::NetCollectionRate => "Net Collection Rate",
            Self::DenialRate => "Denial Rate",
            Self::GrossCharges => "Gross Charges",
            Self::ArDays => "A/R Days",
            Self::PaymentsReceived => "Payments Received (30d)",
            Self::FirstPassRate => "First Pass Rate",
            Self::TotalClaims => "Total Claims",
        }
    }

    pub fn variant(self) -> KpiVariant {
        match self {
            Self::NetCollectionRate | Self::PaymentsReceived => KpiVariant::Success,
            Self::DenialRate => KpiVariant::Destructive,
            Self::ArDays => KpiVariant::Warning,
            Self::GrossCharges | Self::FirstPassRate | Self::TotalClaims => KpiVariant::Default,
        }
    }

    /// Render a metric value the way its card displays it.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::NetCollectionRate | Self::DenialRate | Self::FirstPassRate => {
                format!("{}%", value)
            }
            Self::GrossCharges | Self::PaymentsReceived => {
                format!("${}", formatting::format_locale(value))
            }
            Self::TotalClaims => formatting::format_locale(value),
            Self::ArDays => format!("{}", value),
        }
    }
}

// ── Chart series ──────────────────────────────────────────────────────────────

/// Denial rate for one month label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Three-letter month abbreviation, e.g. `"Jan"`.
    pub period_label: String,
    pub denial_rate_percent: f64,
    pub total_claims: u64,
}

/// One slice of the top denial reasons breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenialReasonSlice {
    pub reason: String,
    pub count: u64,
    /// Share of all denials, rounded to a whole percent.
    pub percentage_percent: u32,
}

// ── Insights ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Anomaly,
    Opportunity,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A static advisory card shown in the insights panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
    pub severity: Severity,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
