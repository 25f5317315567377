//! Colour palette and text styles used across the UI.
//!
//! The palette mirrors the marketplace's dark scheme: deep purple
//! backgrounds with a violet accent.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(0x9B, 0x59, 0xD1);
    pub const CARD_BG: Color = Color::Rgb(0x2A, 0x1F, 0x3B);
    pub const NAVBAR_BG: Color = Color::Rgb(0x23, 0x1C, 0x32);
    pub const TEXT_PRIMARY: Color = Color::Rgb(0xED, 0xE8, 0xF7);
    pub const TEXT_SECONDARY: Color = Color::Rgb(0xB9, 0xA7, 0xD1);
    pub const STAR_FILLED: Color = Color::Rgb(0xFF, 0xD7, 0x00);

    // ── text ───────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn meta_style() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn price_style() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn selected_card_style() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn header_style() -> Style {
        Style::default()
            .bg(Self::NAVBAR_BG)
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn navbar_style() -> Style {
        Style::default().bg(Self::NAVBAR_BG).fg(Self::TEXT_SECONDARY)
    }

    pub fn navbar_active_style() -> Style {
        Style::default()
            .bg(Self::CARD_BG)
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    // ── buttons ────────────────────────────────────────────────
    pub fn button_style() -> Style {
        Style::default()
            .bg(Self::ACCENT)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_done_style() -> Style {
        Style::default()
            .bg(Color::Rgb(0x4C, 0xAF, 0x50))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}
