//! Claims CSV loading.
//!
//! Reads a header-based CSV export into [`ClaimRecord`]s.  The reader only
//! guarantees structure: required headers must be present and rows must be
//! well-formed CSV.  Cell contents are kept as text and coerced later by
//! the aggregator.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use medvisor_core::models::ClaimRecord;
use medvisor_core::{BillingError, Result};

/// Headers every uploaded claims file must carry.
pub const REQUIRED_HEADERS: [&str; 7] = [
    "claim_id",
    "patientName",
    "billedamount",
    "status",
    "payer",
    "provider",
    "dateOfService",
];

/// Result of a successful load: the records plus the header row.
#[derive(Debug, Clone, Default)]
pub struct ParsedClaims {
    pub records: Vec<ClaimRecord>,
    pub headers: Vec<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse a claims CSV file from disk.
pub fn load_claims_csv(path: &Path) -> Result<ParsedClaims> {
    let file = std::fs::File::open(path).map_err(|source| BillingError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_claims_csv(file)?;
    info!(
        "Processed {} rows with {} columns from {}",
        parsed.records.len(),
        parsed.headers.len(),
        path.display()
    );
    Ok(parsed)
}

/// Parse claims CSV content from any reader.
///
/// Blank lines are skipped, cells are trimmed and empty cells become `None`.
/// Rows may be shorter or longer than the header row.
pub fn parse_claims_csv<R: Read>(source: R) -> Result<ParsedClaims> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    validate_headers(&headers)?;

    let mut records = Vec::new();
    for row in rdr.deserialize::<ClaimRecord>() {
        records.push(row?);
    }

    debug!("parsed {} claim rows", records.len());
    Ok(ParsedClaims { records, headers })
}

/// Check that every [`REQUIRED_HEADERS`] entry is present.
///
/// Missing headers are reported together, in required order.
pub fn validate_headers(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|h| h.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BillingError::MissingHeaders(missing))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
