//! Selection action bar — appears when the gallery selection is non-empty.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme;

/// Build the gallery selection bar: count on the left, actions on the right.
///
/// Shown only while at least one venue is selected; the caller hides the
/// bar at count zero so the row returns to being plain hint space.
pub fn selection_bar(count: usize, have_active_project: bool) -> Line<'static> {
    let noun = if count == 1 { "venue" } else { "venues" };
    let mut spans = vec![
        Span::styled(
            format!(" {count} {noun} selected "),
            Style::default()
                .fg(theme::BG_DARK)
                .bg(theme::BRAND_GOLD),
        ),
        Span::raw("  "),
        Span::styled("a ", theme::key_hint_key()),
    ];
    if have_active_project {
        spans.push(Span::styled("add to project  ", theme::key_hint()));
    } else {
        spans.push(Span::styled(
            "add to project (none active)  ",
            Style::default().fg(theme::BORDER_GRAY),
        ));
    }
    spans.push(Span::styled("Space ", theme::key_hint_key()));
    spans.push(Span::styled("toggle  ", theme::key_hint()));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_and_plural_counts() {
        let one = selection_bar(1, true);
        assert!(one.spans[0].content.contains("1 venue selected"));
        let three = selection_bar(3, true);
        assert!(three.spans[0].content.contains("3 venues selected"));
    }
}
