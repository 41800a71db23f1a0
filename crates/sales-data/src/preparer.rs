//! Dataset preparation: raw rows → immutable [`RecordSet`].
//!
//! Runs once per load. Every date must parse; one bad row rejects the whole
//! dataset so a partial load is never presented as complete.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sales_core::error::{Result, SalesError};
use sales_core::models::{RecordSet, SaleRecord};
use tracing::debug;

use crate::reader::RawSaleRow;

/// Calendar-date layouts, tried in order. Month-first layouts go before ISO
/// so `"02-10-23"` is not read as year 2; two-digit years go before
/// four-digit ones so `"04-30-22"` is not read as year 22.
const DATE_FORMATS: &[&str] = &["%m-%d-%y", "%m-%d-%Y", "%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Date-time layouts whose time part is discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Turn raw rows into a [`RecordSet`] plus the sorted, distinct regions.
///
/// Fails with [`SalesError::DataFormat`] (1-based row number) on the first
/// unparseable date. Blank regions are kept on their records but are not
/// offered as selectable regions.
pub fn prepare(rows: Vec<RawSaleRow>) -> Result<(RecordSet, Vec<String>)> {
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let date = parse_date(&row.date).ok_or_else(|| SalesError::DataFormat {
            row: index + 1,
            value: row.date.clone(),
        })?;

        records.push(SaleRecord::new(
            row.region,
            row.category,
            row.quantity,
            row.revenue.unwrap_or(0.0),
            row.status,
            row.is_b2b,
            date,
        ));
    }

    let regions = distinct_regions(&records);
    debug!(
        "Prepared {} records across {} regions",
        records.len(),
        regions.len()
    );

    Ok((RecordSet::new(records), regions))
}

/// Parse a date string in any supported layout.
///
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Distinct non-blank regions in ascending order, spelling preserved.
fn distinct_regions(records: &[SaleRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.region.trim().is_empty())
        .map(|r| r.region.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
