//! Springfield color theme for the springdex TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};

use crate::core::characters::StatusCategory;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Simpsons yellow — primary accent, headings, selected cards.
pub const PRIMARY: Color = Color::Rgb(0xFE, 0xD9, 0x0F);
/// Pale yellow — hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xFF, 0xEB, 0x7A);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Marge blue — modal borders, focused controls.
pub const ACCENT: Color = Color::Rgb(0x3F, 0x8F, 0xE8);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Charcoal — base background.
pub const BG_BASE: Color = Color::Rgb(0x14, 0x16, 0x1C);
/// Surface — modal backdrop.
pub const BG_SURFACE: Color = Color::Rgb(0x1E, 0x22, 0x2B);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — detail labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — placeholders, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — failed loads.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — living characters.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Primary-colored bold text (card names, modal captions).
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Selected card border.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unselected card border.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for placeholders.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "q:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Quote paragraph.
pub fn quote() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::ITALIC)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Value style for the status detail row, keyed by category.
pub fn status_value(category: StatusCategory) -> Style {
    match category {
        StatusCategory::Alive => Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
        StatusCategory::Deceased => Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        StatusCategory::Unknown => Style::default().fg(TEXT),
    }
}

/// Close control, highlighted when it holds focus.
pub fn button(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(BG_BASE)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    }
}
