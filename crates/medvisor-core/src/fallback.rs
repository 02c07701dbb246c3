//! Static sample dataset shown until a claims file has been uploaded.

use crate::models::{
    ClaimRecord, DenialReasonSlice, Insight, InsightKind, KpiMetric, KpiSet, MetricChange,
    Severity, TrendPoint,
};

/// Headline KPIs of the sample dataset.
pub const SAMPLE_KPIS: KpiSet = KpiSet {
    ncr: KpiMetric::new(94.2, MetricChange::increase(2.3)),
    denial_rate: KpiMetric::new(8.7, MetricChange::decrease(1.2)),
    gross_charges: KpiMetric::new(145_000.0, MetricChange::increase(5.8)),
    payments_received: KpiMetric::new(132_000.0, MetricChange::increase(3.4)),
    first_pass_rate: KpiMetric::new(91.3, MetricChange::increase(4.1)),
    ar_days: KpiMetric::new(32.0, MetricChange::decrease(2.1)),
    total_claims: KpiMetric::new(1247.0, MetricChange::increase(8.9)),
};

pub fn sample_kpis() -> KpiSet {
    SAMPLE_KPIS
}

pub fn sample_denial_trend() -> Vec<TrendPoint> {
    [
        ("Jan", 12.5, 1100),
        ("Feb", 11.2, 1150),
        ("Mar", 10.8, 1200),
        ("Apr", 9.5, 1180),
        ("May", 8.9, 1220),
        ("Jun", 8.7, 1247),
    ]
    .into_iter()
    .map(|(label, rate, total)| TrendPoint {
        period_label: label.to_string(),
        denial_rate_percent: rate,
        total_claims: total,
    })
    .collect()
}

pub fn sample_denial_reasons() -> Vec<DenialReasonSlice> {
    [
        ("Missing Documentation", 45, 32),
        ("Prior Authorization", 38, 27),
        ("Coding Error", 28, 20),
        ("Eligibility Issue", 18, 13),
        ("Duplicate Claim", 11, 8),
    ]
    .into_iter()
    .map(|(reason, count, pct)| DenialReasonSlice {
        reason: reason.to_string(),
        count,
        percentage_percent: pct,
    })
    .collect()
}

struct SampleClaim {
    id: &'static str,
    patient: &'static str,
    date: &'static str,
    amount: &'static str,
    payer: &'static str,
    status: Option<&'static str>,
    provider: &'static str,
    days_outstanding: Option<&'static str>,
}

impl SampleClaim {
    fn into_record(self) -> ClaimRecord {
        ClaimRecord {
            claim_id: Some(self.id.to_string()),
            patient_name: Some(self.patient.to_string()),
            date_of_service: Some(self.date.to_string()),
            billed_amount: Some(self.amount.to_string()),
            payer: Some(self.payer.to_string()),
            status: self.status.map(str::to_string),
            provider: Some(self.provider.to_string()),
            days_outstanding: self.days_outstanding.map(str::to_string),
            denial_reason: None,
        }
    }
}

pub fn sample_recent_claims() -> Vec<ClaimRecord> {
    let recent = |id, patient, date, amount, payer, status, provider| SampleClaim {
        id,
        patient,
        date,
        amount,
        payer,
        status: Some(status),
        provider,
        days_outstanding: None,
    };
    vec![
        recent(
            "CLM-2024-001",
            "John Smith",
            "2024-01-15",
            "2450.00",
            "Blue Cross",
            "Paid",
            "Dr. Johnson",
        ),
        recent(
            "CLM-2024-002",
            "Mary Wilson",
            "2024-01-14",
            "1850.00",
            "Aetna",
            "Denied",
            "Dr. Smith",
        ),
        recent(
            "CLM-2024-003",
            "Robert Davis",
            "2024-01-13",
            "3200.00",
            "Medicare",
            "Pending",
            "Dr. Johnson",
        ),
        recent(
            "CLM-2024-004",
            "Lisa Brown",
            "2024-01-12",
            "1650.00",
            "Cigna",
            "Submitted",
            "Dr. Williams",
        ),
        recent(
            "CLM-2024-005",
            "David Miller",
            "2024-01-11",
            "2900.00",
            "United Health",
            "Paid",
            "Dr. Smith",
        ),
    ]
    .into_iter()
    .map(SampleClaim::into_record)
    .collect()
}

pub fn sample_unpaid_claims() -> Vec<ClaimRecord> {
    let unpaid = |id, patient, date, amount, payer, days, provider| SampleClaim {
        id,
        patient,
        date,
        amount,
        payer,
        status: None,
        provider,
        days_outstanding: Some(days),
    };
    vec![
        unpaid(
            "CLM-2023-156",
            "Sarah Johnson",
            "2023-11-20",
            "4200.00",
            "Blue Cross",
            "95",
            "Dr. Wilson",
        ),
        unpaid(
            "CLM-2023-142",
            "Michael Chen",
            "2023-11-15",
            "3800.00",
            "Aetna",
            "87",
            "Dr. Johnson",
        ),
        unpaid(
            "CLM-2023-134",
            "Emily Davis",
            "2023-11-10",
            "2100.00",
            "Medicare",
            "78",
            "Dr. Smith",
        ),
    ]
    .into_iter()
    .map(SampleClaim::into_record)
    .collect()
}

pub fn sample_insights() -> Vec<Insight> {
    vec![
        Insight {
            kind: InsightKind::Anomaly,
            title: "Denial Rate Spike Detected".to_string(),
            description: "Denials increased 27% this week compared to last week".to_string(),
            action: "Review recent submissions for common issues".to_string(),
            severity: Severity::High,
        },
        Insight {
            kind: InsightKind::Opportunity,
            title: "Recovery Opportunity".to_string(),
            description: "You can recover $23,000 by appealing denied claims with code 99213"
                .to_string(),
            action: "Download denied claims report".to_string(),
            severity: Severity::Medium,
        },
        Insight {
            kind: InsightKind::Alert,
            title: "Missing Documentation".to_string(),
            description: "5 claims are missing required documentation".to_string(),
            action: "Contact providers for missing documents".to_string(),
            severity: Severity::High,
        },
    ]
}
