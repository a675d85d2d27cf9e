//! Outreach status badge — a compact colored label for table cells.

use ratatui::style::Style;
use ratatui::text::Span;

use venmap_core::OutreachStatus;

use crate::theme;

/// Render an outreach status as a fixed-width colored badge.
pub fn outreach_badge(status: OutreachStatus) -> Span<'static> {
    let label = match status {
        OutreachStatus::Draft => "draft    ",
        OutreachStatus::Sent => "sent     ",
        OutreachStatus::Pending => "pending  ",
        OutreachStatus::Responded => "responded",
        OutreachStatus::Declined => "declined ",
    };
    Span::styled(label, Style::default().fg(theme::outreach_color(status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_are_fixed_width() {
        for status in [
            OutreachStatus::Draft,
            OutreachStatus::Sent,
            OutreachStatus::Pending,
            OutreachStatus::Responded,
            OutreachStatus::Declined,
        ] {
            assert_eq!(outreach_badge(status).content.len(), 9);
        }
    }
}
