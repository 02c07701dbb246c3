//! Reusable dashboard widgets.

pub mod header;
pub mod insights;
pub mod kpi_card;

pub use header::Header;
pub use insights::InsightCard;
pub use kpi_card::KpiCard;
