//! Data layer for MedVisor.
//!
//! Reads claims CSV exports, aggregates them into KPIs, denial trends and
//! denial-reason breakdowns, assembles the dashboard snapshot and provides
//! the search, paging and export helpers behind the claims tables.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod table;

pub use medvisor_core as core;
