//! Plain-text and JSON rendering of the dashboard views for `--view report` and `--view json`.

use std::fmt::Write;
use std::io::Write as _;

use sales_core::error::Result;
use sales_core::formatting::{format_currency, format_number};
use sales_core::models::DashboardViews;
use sales_ui::components::header::NO_REGION_LABEL;
use sales_ui::dashboard_view::{CATEGORIES_TITLE, STATUS_TITLE, TREND_TITLE};
use sales_ui::metrics_table::{metric_rows, SUMMARY_TITLE};

const LABEL_WIDTH: usize = 24;

/// Render the four views for `selection` as a text report.
///
/// Placeholder views print their message once instead of empty sections.
pub fn render_report(selection: Option<&str>, views: &DashboardViews) -> String {
    let mut out = String::new();
    let metrics = &views.metrics;

    let _ = writeln!(out, "REGION PERFORMANCE DASHBOARD");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Region: {} ({} orders)",
        selection.unwrap_or(NO_REGION_LABEL),
        format_number(metrics.count as f64, 0)
    );

    if let Some(message) = metrics.message.as_deref() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", message);
        return out;
    }

    section(&mut out, CATEGORIES_TITLE);
    for c in &views.top_categories {
        row(&mut out, &c.category, &format_number(c.quantity as f64, 0));
    }

    section(&mut out, TREND_TITLE);
    for p in &views.revenue_trend {
        row(&mut out, &p.period.to_string(), &format_currency(p.revenue));
    }

    section(&mut out, STATUS_TITLE);
    for s in &views.status_distribution {
        row(&mut out, &s.status, &format_number(s.count as f64, 0));
    }

    section(&mut out, SUMMARY_TITLE);
    for (label, value) in metric_rows(metrics) {
        row(&mut out, label, &value);
    }

    out
}

/// Pretty-printed JSON of the four views.
pub fn render_json(views: &DashboardViews) -> Result<String> {
    Ok(serde_json::to_string_pretty(views)?)
}

/// Write `text` to stdout and flush.
pub fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<width$} {}", label, value, width = LABEL_WIDTH);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::models::{NO_DATA_MESSAGE, NO_SELECTION_MESSAGE};
    use sales_data::prepare;
    use sales_data::reader::load_rows_from_str;

    const CSV: &str = "\
ship_state,category,qty,amount_eu,status,B2B,date
MAHARASHTRA,Set,2,1000.0,Shipped,True,04-30-22
MAHARASHTRA,Kurta,1,300.0,Cancelled,False,05-02-22
KARNATAKA,Set,5,2500.0,Shipped,False,04-15-22
";

    fn views_for(region: Option<&str>) -> DashboardViews {
        let (records, _) = prepare(load_rows_from_str(CSV).unwrap()).unwrap();
        sales_data::update(&records, region)
    }

    #[test]
    fn test_report_contains_all_sections() {
        let text = render_report(Some("MAHARASHTRA"), &views_for(Some("MAHARASHTRA")));
        assert!(text.starts_with("REGION PERFORMANCE DASHBOARD\n"));
        assert!(text.contains("Region: MAHARASHTRA (2 orders)"));
        for title in [CATEGORIES_TITLE, TREND_TITLE, STATUS_TITLE, SUMMARY_TITLE] {
            assert!(text.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn test_report_rows_follow_view_order() {
        let text = render_report(Some("MAHARASHTRA"), &views_for(Some("MAHARASHTRA")));
        let april = text.find("2022-04").unwrap();
        let may = text.find("2022-05").unwrap();
        assert!(april < may, "trend must be chronological");
        assert!(text.contains("€1,000"));
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_report_placeholder_prints_message_only() {
        let text = render_report(None, &views_for(None));
        assert!(text.contains(NO_SELECTION_MESSAGE));
        assert!(text.contains(NO_REGION_LABEL));
        assert!(!text.contains(SUMMARY_TITLE));
    }

    #[test]
    fn test_render_json_fields() {
        let json = render_json(&views_for(Some("MAHARASHTRA"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["count"], 2);
        assert_eq!(value["revenue_trend"][0]["period"], "2022-04");
        assert!(value["metrics"].get("message").is_none());
    }

    #[test]
    fn test_render_json_placeholder_carries_message() {
        let json = render_json(&views_for(None)).unwrap();
        assert!(json.contains(NO_SELECTION_MESSAGE));
    }

    #[test]
    fn test_report_unknown_region() {
        let text = render_report(Some("GOA"), &views_for(Some("GOA")));
        assert!(text.contains("Region: GOA (0 orders)"));
        assert!(text.contains(NO_DATA_MESSAGE));
    }
}
