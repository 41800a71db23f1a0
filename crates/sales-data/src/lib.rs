//! Data layer for the region sales dashboard.
//!
//! Reads the sales CSV, prepares it into an immutable
//! [`RecordSet`](sales_core::models::RecordSet) with per-record month buckets,
//! and aggregates a region selection into the four dashboard views.

pub mod aggregator;
pub mod preparer;
pub mod reader;

pub use aggregator::{update, ViewAggregator};
pub use preparer::prepare;
pub use sales_core as core;
