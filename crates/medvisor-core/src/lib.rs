//! Domain model and shared helpers for MedVisor.
//!
//! Holds the claim record and KPI types, the rounding and change arithmetic
//! used by the aggregator, date parsing, display formatting, the static
//! sample dataset and the command-line settings.

pub mod calculations;
pub mod error;
pub mod fallback;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BillingError, Result};
