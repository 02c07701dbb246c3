//! Terminal UI layer for MedVisor.
//!
//! Provides themes, the header, KPI card and insight components, the denial
//! charts, the claims tables and the main application event loop built on
//! top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod table_view;
pub mod themes;

pub use medvisor_core as core;
