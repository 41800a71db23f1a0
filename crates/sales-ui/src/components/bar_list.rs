use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest label column, in terminal cells, before labels are truncated.
const MAX_LABEL_WIDTH: usize = 24;

/// Characters used to draw bars.
pub struct BarGlyphs {
    pub filled: char,
    pub empty: char,
}

impl Default for BarGlyphs {
    fn default() -> Self {
        Self {
            filled: '\u{2588}', // █  FULL BLOCK
            empty: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// One row: a label, the magnitude that sizes its bar, and the text printed
/// after the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub label: String,
    pub value: f64,
    pub display: String,
}

impl BarItem {
    pub fn new(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
        }
    }
}

// ── BarList ───────────────────────────────────────────────────────────────────

/// Horizontal bar chart drawn as one [`Line`] per item.
///
/// Bars are scaled against the largest value in the list. Items keep the
/// order they were given in.
pub struct BarList<'a> {
    pub items: Vec<BarItem>,
    pub theme: &'a Theme,
    /// Single style for every bar; `None` cycles through the theme series.
    pub style: Option<Style>,
    pub glyphs: BarGlyphs,
}

impl<'a> BarList<'a> {
    pub fn new(items: Vec<BarItem>, theme: &'a Theme) -> Self {
        Self {
            items,
            theme,
            style: None,
            glyphs: BarGlyphs::default(),
        }
    }

    /// Draw every bar in `style` instead of the series colours.
    pub fn uniform(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Render rows fitted to `width` terminal cells.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let width = width as usize;
        let label_width = self
            .items
            .iter()
            .map(|i| i.label.width())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH)
            .min(width / 3);
        let display_width = self
            .items
            .iter()
            .map(|i| i.display.width())
            .max()
            .unwrap_or(0);
        // label + space + bar + space + display
        let bar_width = width.saturating_sub(label_width + display_width + 2);

        let max = self
            .items
            .iter()
            .map(|i| i.value)
            .fold(0.0_f64, f64::max);

        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let filled = if max > 0.0 {
                    ((item.value.max(0.0) / max) * bar_width as f64).round() as usize
                } else {
                    0
                };
                let filled = filled.min(bar_width);
                let empty = bar_width - filled;

                let bar_style = self
                    .style
                    .unwrap_or_else(|| self.theme.series_style(index));

                Line::from(vec![
                    Span::styled(fit_label(&item.label, label_width), self.theme.label),
                    Span::raw(" "),
                    Span::styled(
                        self.glyphs.filled.to_string().repeat(filled),
                        bar_style,
                    ),
                    Span::styled(
                        self.glyphs.empty.to_string().repeat(empty),
                        self.theme.bar_empty,
                    ),
                    Span::raw(" "),
                    Span::styled(item.display.clone(), self.theme.bar_label),
                ])
            })
            .collect()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Pad `label` to exactly `width` cells, truncating with `…` when too long.
fn fit_label(label: &str, width: usize) -> String {
    let current = label.width();
    if current <= width {
        return format!("{}{}", label, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
