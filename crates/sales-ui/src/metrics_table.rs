//! Summary metrics table for the region sales dashboard.
//!
//! Renders a bordered two-column [`ratatui::widgets::Table`] with one row per
//! metric, or the placeholder message when the selection produced no data.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use sales_core::formatting;
use sales_core::models::SummaryMetrics;

use crate::themes::Theme;

/// Panel title.
pub const SUMMARY_TITLE: &str = "Summary";

/// Label/value pairs in display order.
///
/// Placeholder metrics still produce all five rows; callers decide whether to
/// show the message instead.
pub fn metric_rows(metrics: &SummaryMetrics) -> Vec<(&'static str, String)> {
    vec![
        (
            "Total Orders",
            formatting::format_number(metrics.count as f64, 0),
        ),
        (
            "Total Revenue",
            formatting::format_currency(metrics.total_revenue),
        ),
        (
            "Average Order Value",
            formatting::format_currency(metrics.average_revenue),
        ),
        (
            "B2B Share (%)",
            formatting::format_percent(metrics.b2b_share_percent, 1),
        ),
        ("Top Category", metrics.top_category.clone()),
    ]
}

/// Render the summary metrics into `area`.
pub fn render_metrics_table(frame: &mut Frame, area: Rect, metrics: &SummaryMetrics, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", SUMMARY_TITLE));

    if let Some(message) = metrics.message.as_deref() {
        render_message(frame, area, block, message, theme);
        return;
    }

    let header = Row::new(
        ["Metric", "Value"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = metric_rows(metrics)
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![Cell::from(label), Cell::from(value)]).style(style)
        })
        .collect();

    let widths = [Constraint::Length(22), Constraint::Min(10)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a bordered panel showing only `message`.
pub fn render_message(frame: &mut Frame, area: Rect, block: Block, message: &str, theme: &Theme) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
    ]);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
