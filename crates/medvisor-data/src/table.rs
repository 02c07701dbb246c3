//! Tabular presentation of claim records: columns, search, paging and CSV
//! export.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use medvisor_core::formatting::format_number;
use medvisor_core::models::ClaimRecord;
use medvisor_core::{BillingError, Result};

// ── Columns ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimColumn {
    ClaimId,
    Patient,
    DateOfService,
    Amount,
    Payer,
    Status,
    Provider,
    DaysOutstanding,
}

/// Columns of the recent claims table.
pub const RECENT_COLUMNS: [ClaimColumn; 7] = [
    ClaimColumn::ClaimId,
    ClaimColumn::Patient,
    ClaimColumn::DateOfService,
    ClaimColumn::Amount,
    ClaimColumn::Payer,
    ClaimColumn::Status,
    ClaimColumn::Provider,
];

/// Columns of the unpaid claims table.
pub const UNPAID_COLUMNS: [ClaimColumn; 7] = [
    ClaimColumn::ClaimId,
    ClaimColumn::Patient,
    ClaimColumn::DateOfService,
    ClaimColumn::Amount,
    ClaimColumn::Payer,
    ClaimColumn::DaysOutstanding,
    ClaimColumn::Provider,
];

impl ClaimColumn {
    pub fn label(self) -> &'static str {
        match self {
            Self::ClaimId => "Claim ID",
            Self::Patient => "Patient",
            Self::DateOfService => "Date of Service",
            Self::Amount => "Amount",
            Self::Payer => "Payer",
            Self::Status => "Status",
            Self::Provider => "Provider",
            Self::DaysOutstanding => "Days Outstanding",
        }
    }

    /// The unformatted cell text, as found in the source file.
    pub fn raw<'a>(self, record: &'a ClaimRecord) -> Option<&'a str> {
        let field = match self {
            Self::ClaimId => &record.claim_id,
            Self::Patient => &record.patient_name,
            Self::DateOfService => &record.date_of_service,
            Self::Amount => &record.billed_amount,
            Self::Payer => &record.payer,
            Self::Status => &record.status,
            Self::Provider => &record.provider,
            Self::DaysOutstanding => &record.days_outstanding,
        };
        field.as_deref()
    }

    /// The display text of this column for `record`.
    pub fn cell(self, record: &ClaimRecord) -> String {
        match self {
            Self::Amount => format_amount(record.billed_amount()),
            Self::DaysOutstanding => {
                format!("{} days", record.days_outstanding().unwrap_or(0))
            }
            _ => self.raw(record).unwrap_or_default().to_string(),
        }
    }
}

/// `"$2,450"`, `"$2,450.5"`: grouped dollars with at most two decimals.
fn format_amount(amount: f64) -> String {
    let fixed = format_number(amount, 2);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("${}", trimmed)
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Records where any present field contains `term`, ignoring case.
///
/// A blank term keeps every record.  Order is preserved.
pub fn filter_claims<'a>(records: &'a [ClaimRecord], term: &str) -> Vec<&'a ClaimRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| r.field_values().any(|v| v.to_lowercase().contains(&needle)))
        .collect()
}

// ── Pagination ────────────────────────────────────────────────────────────────

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually shown.
    pub number: usize,
    pub total_pages: usize,
    /// Index of the first item on this page.
    pub start: usize,
    /// One past the index of the last item on this page.
    pub end: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// `"Showing 11-20 of 34 results"`.
    pub fn caption(&self) -> String {
        if self.total == 0 {
            return "No results".to_string();
        }
        format!(
            "Showing {}-{} of {} results",
            self.start + 1,
            self.end,
            self.total
        )
    }
}

/// Slice out page `page` (1-based) of `items`.
///
/// Page numbers outside `1..=total_pages` are clamped, so the result always
/// describes a real page (page 1 of an empty list has no items).
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));
    let start = ((number - 1) * per_page).min(total);
    let end = (start + per_page).min(total);

    Page {
        items: &items[start..end],
        number,
        total_pages,
        start,
        end,
        total,
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Write `records` as CSV: a header row of column labels, then the raw
/// field values of each record (empty when absent).
pub fn write_claims_csv<W: Write>(
    records: &[&ClaimRecord],
    columns: &[ClaimColumn],
    writer: W,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|c| c.label()))?;
    for record in records {
        wtr.write_record(columns.iter().map(|c| c.raw(record).unwrap_or_default()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name a table titled `title` is exported under.
///
/// ```
/// use medvisor_data::table::export_file_name;
///
/// assert_eq!(export_file_name("Unpaid > 60 Days"), "unpaid_>_60_days.csv");
/// ```
pub fn export_file_name(title: &str) -> String {
    let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
    format!("{}.csv", words.join("_"))
}

/// Export a table into `dir`, returning the path written.
pub fn export_table(
    dir: &Path,
    title: &str,
    records: &[&ClaimRecord],
    columns: &[ClaimColumn],
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(title));
    let export_err = |reason: String| BillingError::Export {
        path: path.clone(),
        reason,
    };

    let file = std::fs::File::create(&path).map_err(|e| export_err(e.to_string()))?;
    write_claims_csv(records, columns, file).map_err(|e| export_err(e.to_string()))?;

    info!("exported {} rows to {}", records.len(), path.display());
    Ok(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
