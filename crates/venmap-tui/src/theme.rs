//! Venmap brand palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use venmap_core::OutreachStatus;

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRAND_GOLD: Color = Color::Rgb(230, 179, 79); // #e6b34f
pub const SOFT_TEAL: Color = Color::Rgb(99, 212, 189); // #63d4bd
pub const WARM_ROSE: Color = Color::Rgb(235, 129, 129); // #eb8181
pub const SKY_BLUE: Color = Color::Rgb(125, 185, 235); // #7db9eb
pub const SUCCESS_GREEN: Color = Color::Rgb(112, 219, 122); // #70db7a
pub const ERROR_RED: Color = Color::Rgb(240, 95, 95); // #f05f5f

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(200, 200, 205); // #c8c8cd
pub const BORDER_GRAY: Color = Color::Rgb(105, 110, 130); // #696e82
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 44, 54); // #2c2c36
pub const BG_DARK: Color = Color::Rgb(26, 27, 34); // #1a1b22

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(SOFT_TEAL)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(BRAND_GOLD)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(SOFT_TEAL)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(SOFT_TEAL).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD)
}

/// Color keyed to an outreach status, shared by badges and tables.
pub fn outreach_color(status: OutreachStatus) -> Color {
    match status {
        OutreachStatus::Draft => BORDER_GRAY,
        OutreachStatus::Sent => SKY_BLUE,
        OutreachStatus::Pending => BRAND_GOLD,
        OutreachStatus::Responded => SUCCESS_GREEN,
        OutreachStatus::Declined => ERROR_RED,
    }
}
