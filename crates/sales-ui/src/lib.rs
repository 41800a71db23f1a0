//! Terminal UI layer for the region sales dashboard.
//!
//! Provides themes, the header and bar-row components, the summary metrics
//! table, the dashboard layout, and the interactive event loop built on top
//! of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod metrics_table;
pub mod themes;

pub use sales_core as core;
