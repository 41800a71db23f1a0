//! Runtime layer for the region sales dashboard.
//!
//! Hosts the interactive selection: holds one region choice and recomputes
//! the dashboard views whenever it changes.

pub mod session;

pub use sales_core as core;
pub use sales_data as data;
