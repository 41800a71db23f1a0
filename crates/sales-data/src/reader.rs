//! CSV loading for the sales dataset.
//!
//! Maps the export's column names onto [`RawSaleRow`]. Dates stay as text
//! here; turning them into calendar dates is the preparer's job.
//!
//! Expected columns (extra columns are ignored):
//!   ship_state, category, qty, amount_eu, status, B2B, date

use std::io::Read;
use std::path::Path;

use sales_core::error::{Result, SalesError};
use sales_core::models::RecordSet;
use serde::Deserialize;
use tracing::debug;

use crate::preparer;

/// One CSV row, typed but not yet validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSaleRow {
    #[serde(rename = "ship_state", default)]
    pub region: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "qty", deserialize_with = "deserialize_quantity")]
    pub quantity: u64,
    /// Missing amounts are kept as `None` and count as zero revenue.
    #[serde(rename = "amount_eu", deserialize_with = "deserialize_revenue", default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "B2B", deserialize_with = "deserialize_bool", default)]
    pub is_b2b: bool,
    pub date: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse rows from any CSV byte source.
///
/// The whole load fails on the first malformed row; the error names the CSV
/// line (header is line 1).
pub fn load_rows<R: Read>(reader: R) -> Result<Vec<RawSaleRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: RawSaleRow =
            result.map_err(|e| SalesError::Csv(format!("line {}: {}", index + 2, e)))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse rows from CSV text, ignoring a leading UTF-8 byte-order mark.
pub fn load_rows_from_str(text: &str) -> Result<Vec<RawSaleRow>> {
    load_rows(text.trim_start_matches('\u{FEFF}').as_bytes())
}

/// Read and parse the CSV file at `path`.
pub fn load_rows_from_file(path: &Path) -> Result<Vec<RawSaleRow>> {
    let text = std::fs::read_to_string(path).map_err(|source| SalesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = load_rows_from_str(&text)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read the CSV at `path` and prepare it in one step.
///
/// Returns the record set and the sorted region universe.
pub fn load_dataset(path: &Path) -> Result<(RecordSet, Vec<String>)> {
    preparer::prepare(load_rows_from_file(path)?)
}

// ── Field deserializers ───────────────────────────────────────────────────────

/// Cell spellings that mean "no value" in exported data frames.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Optional finite amount; missing-value markers become `None`.
fn deserialize_revenue<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Some(f)),
        _ => Err(serde::de::Error::custom(format!(
            "expected finite amount, got '{}'",
            trimmed
        ))),
    }
}

/// Flexible bool: "true"/"false", "1"/"0", "yes"/"no", "y"/"n"; empty is false.
fn deserialize_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected bool value, got '{}'",
            other
        ))),
    }
}

/// Non-negative whole quantity; accepts float spellings such as `"3.0"`.
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(serde::de::Error::custom(format!(
            "expected non-negative whole quantity, got '{}'",
            trimmed
        ))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
index,date,status,category,qty,amount_eu,ship_state,B2B
0,04-30-22,Shipped,Set,1,647.62,MAHARASHTRA,False
1,04-30-22,Cancelled,kurta,1,,KARNATAKA,False
2,2022-05-02,Shipped - Delivered to Buyer,Western Dress,2,1149.0,Maharashtra,True
";

    // ── load_rows ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_sample_csv() {
        let rows = load_rows(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region, "MAHARASHTRA");
        assert_eq!(rows[0].category, "Set");
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(rows[0].revenue, Some(647.62));
        assert_eq!(rows[0].date, "04-30-22");
        assert!(!rows[0].is_b2b);
        assert!(rows[2].is_b2b);
        assert_eq!(rows[2].quantity, 2);
    }

    #[test]
    fn test_missing_amount_is_none() {
        let rows = load_rows(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows[1].revenue, None);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\n  NY , Books ,2, 20.5 ,Shipped, yes ,2023-01-05\n";
        let rows = load_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].region, "NY");
        assert_eq!(rows[0].category, "Books");
        assert_eq!(rows[0].revenue, Some(20.5));
        assert!(rows[0].is_b2b);
    }

    #[test]
    fn test_float_quantity_accepted() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,3.0,1,Shipped,0,2023-01-05\n";
        let rows = load_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].quantity, 3);
    }

    #[test]
    fn test_negative_quantity_rejected_with_line() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,1,1,Shipped,0,2023-01-05\nNY,Books,-2,1,Shipped,0,2023-01-05\n";
        let err = load_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SalesError::Csv(_)));
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,1,1,Shipped,maybe,2023-01-05\n";
        let err = load_rows(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("maybe"), "got: {err}");
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,1,abc,Shipped,0,2023-01-05\n";
        assert!(load_rows(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_markers_amount_is_none() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\n\
NY,Books,1,NaN,Shipped,0,2023-01-05\n\
NY,Books,1,NA,Shipped,0,2023-01-05\n\
NY,Books,1,null,Shipped,0,2023-01-05\n\
NY,Books,1,5,Shipped,0,2023-01-05\n";
        let rows = load_rows(csv.as_bytes()).unwrap();
        let revenues: Vec<Option<f64>> = rows.iter().map(|r| r.revenue).collect();
        assert_eq!(revenues, vec![None, None, None, Some(5.0)]);
    }

    #[test]
    fn test_missing_marker_amount_keeps_totals_finite() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\n\
NY,Books,1,NaN,Shipped,0,2023-01-05\n\
NY,Books,1,5,Shipped,0,2023-01-06\n";
        let (records, _) = preparer::prepare(load_rows(csv.as_bytes()).unwrap()).unwrap();
        let views = crate::update(&records, Some("NY"));
        assert_eq!(views.metrics.total_revenue, 5.0);
        assert_eq!(views.metrics.average_revenue, 2.5);
        assert_eq!(views.revenue_trend[0].revenue, 5.0);
    }

    #[test]
    fn test_infinite_amount_rejected() {
        let csv = "ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,1,inf,Shipped,0,2023-01-05\n";
        let err = load_rows(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("finite"), "got: {err}");
    }

    // ── load_rows_from_str ────────────────────────────────────────────────────

    #[test]
    fn test_bom_is_stripped() {
        let text = format!("\u{FEFF}{}", SAMPLE_CSV);
        let rows = load_rows_from_str(&text).unwrap();
        assert_eq!(rows.len(), 3);
    }

    // ── load_rows_from_file / load_dataset ────────────────────────────────────

    #[test]
    fn test_load_rows_from_missing_file() {
        let err = load_rows_from_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SalesError::FileRead { .. }));
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let (records, regions) = load_dataset(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(regions, vec!["KARNATAKA", "MAHARASHTRA", "Maharashtra"]);
        assert_eq!(records.records()[0].period().to_string(), "2022-04");
        assert_eq!(records.records()[2].period().to_string(), "2022-05");
    }

    #[test]
    fn test_load_dataset_bad_date_fails_whole_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"ship_state,category,qty,amount_eu,status,B2B,date\nNY,Books,1,1,Shipped,0,2023-01-05\nNY,Toys,1,1,Shipped,0,not-a-date\n",
        )
        .unwrap();

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, SalesError::DataFormat { row: 2, .. }), "got: {err}");
    }
}
