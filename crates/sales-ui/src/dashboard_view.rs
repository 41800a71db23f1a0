//! Full-screen dashboard layout.
//!
//! Header on top, the region list on the left and a 2×2 grid of view panels
//! on the right, with a one-line key hint at the bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use sales_core::formatting;
use sales_core::models::{CategoryQuantity, DashboardViews, PeriodRevenue, StatusCount};

use crate::components::bar_list::{BarItem, BarList};
use crate::components::header::Header;
use crate::metrics_table;
use crate::themes::Theme;

pub const CATEGORIES_TITLE: &str = "Top Product Categories";
pub const TREND_TITLE: &str = "Monthly Revenue Trend";
pub const STATUS_TITLE: &str = "Top 5 Order Statuses";
pub const REGIONS_TITLE: &str = "Regions";

const KEY_HINT: &str = " ↑/↓ j/k move   Home/End jump   c clear   q quit ";
const REGION_LIST_WIDTH: u16 = 26;

/// Everything the dashboard needs for one frame.
pub struct DashboardViewData<'a> {
    /// Selectable regions, sorted.
    pub regions: &'a [String],
    /// Highlighted row in the region list.
    pub cursor: Option<usize>,
    /// Region the views were computed for.
    pub selection: Option<&'a str>,
    pub views: &'a DashboardViews,
}

/// Render the complete dashboard into the frame.
pub fn render_dashboard(frame: &mut Frame, data: &DashboardViewData, theme: &Theme) {
    let [header_area, body_area, hint_area] = split_screen(frame.area());

    let header = Header::new(data.selection, data.views.metrics.count, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(REGION_LIST_WIDTH), Constraint::Min(0)])
        .split(body_area);

    render_region_list(frame, body[0], data.regions, data.cursor, theme);
    render_panels(frame, body[1], data.views, theme);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(KEY_HINT, theme.dim))),
        hint_area,
    );
}

/// Render the region list with the cursor row highlighted.
pub fn render_region_list(
    frame: &mut Frame,
    area: Rect,
    regions: &[String],
    cursor: Option<usize>,
    theme: &Theme,
) {
    let items: Vec<ListItem> = regions
        .iter()
        .map(|r| ListItem::new(Span::styled(r.clone(), theme.text)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", REGIONS_TITLE)),
        )
        .highlight_style(theme.selection)
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the 2×2 grid of view panels.
pub fn render_panels(frame: &mut Frame, area: Rect, views: &DashboardViews, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let message = views.metrics.message.as_deref();

    render_bar_panel(
        frame,
        top[0],
        CATEGORIES_TITLE,
        category_items(&views.top_categories),
        None,
        message,
        theme,
    );
    render_bar_panel(
        frame,
        top[1],
        TREND_TITLE,
        trend_items(&views.revenue_trend),
        Some(theme.trend),
        message,
        theme,
    );
    render_bar_panel(
        frame,
        bottom[0],
        STATUS_TITLE,
        status_items(&views.status_distribution),
        None,
        message,
        theme,
    );
    metrics_table::render_metrics_table(frame, bottom[1], &views.metrics, theme);
}

/// Shown before the first snapshot arrives.
pub fn render_loading(frame: &mut Frame, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Loading sales data...", theme.info)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Region Sales "),
        ),
        frame.area(),
    );
}

// ── Bar items ─────────────────────────────────────────────────────────────────

pub fn category_items(categories: &[CategoryQuantity]) -> Vec<BarItem> {
    categories
        .iter()
        .map(|c| {
            BarItem::new(
                c.category.clone(),
                c.quantity as f64,
                formatting::format_number(c.quantity as f64, 0),
            )
        })
        .collect()
}

pub fn trend_items(trend: &[PeriodRevenue]) -> Vec<BarItem> {
    trend
        .iter()
        .map(|p| {
            BarItem::new(
                p.period.to_string(),
                p.revenue,
                formatting::format_currency(p.revenue),
            )
        })
        .collect()
}

pub fn status_items(statuses: &[StatusCount]) -> Vec<BarItem> {
    statuses
        .iter()
        .map(|s| {
            BarItem::new(
                s.status.clone(),
                s.count as f64,
                formatting::format_number(s.count as f64, 0),
            )
        })
        .collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header (4 lines), body, key hint (1 line).
fn split_screen(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn render_bar_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<BarItem>,
    style: Option<Style>,
    message: Option<&str>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title));

    if items.is_empty() {
        metrics_table::render_message(frame, area, block, message.unwrap_or(""), theme);
        return;
    }

    let mut bars = BarList::new(items, theme);
    if let Some(style) = style {
        bars = bars.uniform(style);
    }
    let lines = bars.to_lines(area.width.saturating_sub(2));
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
