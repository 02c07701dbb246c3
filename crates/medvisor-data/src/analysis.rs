//! Dashboard state and snapshot assembly.
//!
//! [`DashboardState`] is the caller-owned application state (the uploaded
//! records and whether the uploader is open).  [`DashboardSnapshot::build`]
//! turns it into every view-model the dashboard renders, falling back to
//! the sample dataset while nothing has been uploaded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use medvisor_core::fallback;
use medvisor_core::models::{ClaimRecord, DenialReasonSlice, Insight, KpiSet, TrendPoint};
use medvisor_core::Result;

use crate::aggregator::ClaimsAggregator;
use crate::reader;

/// Claims outstanding for more than this many days are listed as unpaid.
pub const UNPAID_THRESHOLD_DAYS: i64 = 60;

// ── DashboardState ────────────────────────────────────────────────────────────

/// Application state owned by the dashboard front end.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Records from the most recent upload; empty until one succeeds.
    pub uploaded: Vec<ClaimRecord>,
    /// File the current records were loaded from.
    pub source: Option<PathBuf>,
    /// Whether the uploader prompt is open.
    pub show_uploader: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_upload(&self) -> bool {
        !self.uploaded.is_empty()
    }

    /// Replace the record set wholesale and close the uploader.
    pub fn upload(&mut self, records: Vec<ClaimRecord>, source: Option<PathBuf>) {
        self.uploaded = records;
        self.source = source;
        self.show_uploader = false;
    }

    /// Load `path` and, on success, replace the current records with it.
    ///
    /// On failure the previous records are kept and the error is returned
    /// for the caller to report.  Returns the number of rows loaded.
    pub fn upload_file(&mut self, path: &Path) -> Result<usize> {
        let parsed = reader::load_claims_csv(path)?;
        let rows = parsed.records.len();
        self.upload(parsed.records, Some(path.to_path_buf()));
        info!("uploaded {} claims from {}", rows, path.display());
        Ok(rows)
    }
}

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// Every view-model the dashboard shows, computed for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: KpiSet,
    pub denial_trend: Vec<TrendPoint>,
    pub denial_reasons: Vec<DenialReasonSlice>,
    pub recent_claims: Vec<ClaimRecord>,
    pub unpaid_claims: Vec<ClaimRecord>,
    pub insights: Vec<Insight>,
    /// `true` when the figures come from the built-in sample dataset.
    pub is_sample_data: bool,
}

impl DashboardSnapshot {
    /// Build the snapshot for `state` with period windows ending at `now`.
    pub fn build(state: &DashboardState, now: DateTime<Utc>) -> Self {
        if !state.has_upload() {
            return Self::sample();
        }

        let records = &state.uploaded;
        Self {
            kpis: ClaimsAggregator::compute_kpis(records, now),
            denial_trend: ClaimsAggregator::compute_denial_trend(records),
            denial_reasons: ClaimsAggregator::compute_denial_reasons(records),
            recent_claims: records.clone(),
            unpaid_claims: unpaid_claims(records),
            insights: fallback::sample_insights(),
            is_sample_data: false,
        }
    }

    /// The snapshot shown before any upload.
    pub fn sample() -> Self {
        Self {
            kpis: fallback::sample_kpis(),
            denial_trend: fallback::sample_denial_trend(),
            denial_reasons: fallback::sample_denial_reasons(),
            recent_claims: fallback::sample_recent_claims(),
            unpaid_claims: fallback::sample_unpaid_claims(),
            insights: fallback::sample_insights(),
            is_sample_data: true,
        }
    }

    /// Pretty-printed JSON for `--json` output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Records outstanding for more than [`UNPAID_THRESHOLD_DAYS`].
pub fn unpaid_claims(records: &[ClaimRecord]) -> Vec<ClaimRecord> {
    records
        .iter()
        .filter(|r| r.days_outstanding().is_some_and(|d| d > UNPAID_THRESHOLD_DAYS))
        .cloned()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
