use crate::themes::Theme;
use ratatui::text::{Line, Span};
use sales_core::formatting::format_number;

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Shown in the info line when no region is selected.
pub const NO_REGION_LABEL: &str = "no region";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. `[ region | N records ]` for the current selection.
/// 4. An empty line.
pub struct Header<'a> {
    /// Selected region, if any.
    pub region: Option<&'a str>,
    /// Records matched by the selection.
    pub matched: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(region: Option<&'a str>, matched: usize, theme: &'a Theme) -> Self {
        Self {
            region,
            matched,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let noun = if self.matched == 1 { "order" } else { "orders" };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" REGION PERFORMANCE DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.region.unwrap_or(NO_REGION_LABEL), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} {}", format_number(self.matched as f64, 0), noun),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new(Some("NY"), 2, &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new(Some("NY"), 2, &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains("REGION PERFORMANCE DASHBOARD"), "got: {title}");
        assert!(title.contains(SPARKLES), "got: {title}");
    }

    #[test]
    fn test_header_info_line_region_and_count() {
        let theme = Theme::dark();
        let lines = Header::new(Some("MAHARASHTRA"), 1_234, &theme).to_lines();
        assert_eq!(text(&lines[2]), "[ MAHARASHTRA | 1,234 orders ]");
    }

    #[test]
    fn test_header_info_line_singular() {
        let theme = Theme::dark();
        let lines = Header::new(Some("NY"), 1, &theme).to_lines();
        assert_eq!(text(&lines[2]), "[ NY | 1 order ]");
    }

    #[test]
    fn test_header_without_region() {
        let theme = Theme::light();
        let lines = Header::new(None, 0, &theme).to_lines();
        assert!(text(&lines[2]).contains(NO_REGION_LABEL));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new(None, 0, &theme).to_lines();
        let sep = text(&lines[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }
}
