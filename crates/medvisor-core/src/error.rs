use std::path::PathBuf;
use thiserror::Error;

/// All errors produced outside the claims aggregator.
///
/// The aggregator itself never fails: degraded input is coerced to a default
/// value. These variants cover loading, exporting and presenting the data.
#[derive(Error, Debug)]
pub enum BillingError {
    /// A claims file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV document is structurally malformed.
    #[error("Error parsing CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// One or more required column headers are absent.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// A table export could not be written.
    #[error("Failed to export {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    /// A snapshot could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the medvisor crates.
pub type Result<T> = std::result::Result<T, BillingError>;
