//! Theme: dark and light palettes, layout metrics.

use ratatui::style::Color;

use crate::state::ThemeChoice;

pub struct Palette {
    /// Result pane canvas.
    pub bg: Color,
    /// Input bar, status, dropdown.
    pub elevated: Color,
    pub border: Color,
    /// Prompt, matched query text, selection bar.
    pub accent: Color,
    /// Title, history indices.
    pub accent_soft: Color,
    /// Highlighted dropdown row.
    pub selection: Color,
    pub text: Color,
    pub text_dim: Color,
    pub muted: Color,
    pub error: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(0x18, 0x1c, 0x22),
    elevated: Color::Rgb(0x16, 0x1a, 0x1f),
    border: Color::Rgb(0x2d, 0x34, 0x3e),
    accent: Color::Rgb(0x6b, 0xbc, 0xff),
    accent_soft: Color::Rgb(0x99, 0xd4, 0xff),
    selection: Color::Rgb(0x1e, 0x2d, 0x3d),
    text: Color::Rgb(0xf2, 0xf4, 0xf8),
    text_dim: Color::Rgb(0xbc, 0xc5, 0xd0),
    muted: Color::Rgb(0x94, 0x9e, 0xad),
    error: Color::Rgb(0xf0, 0x6c, 0x6c),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(0xfb, 0xfc, 0xfe),
    elevated: Color::Rgb(0xee, 0xf1, 0xf5),
    border: Color::Rgb(0xc9, 0xd1, 0xdb),
    accent: Color::Rgb(0x1f, 0x6f, 0xc5),
    accent_soft: Color::Rgb(0x3b, 0x82, 0xd0),
    selection: Color::Rgb(0xd8, 0xe8, 0xfa),
    text: Color::Rgb(0x16, 0x1a, 0x1f),
    text_dim: Color::Rgb(0x3d, 0x46, 0x52),
    muted: Color::Rgb(0x6b, 0x75, 0x82),
    error: Color::Rgb(0xc2, 0x2f, 0x2f),
};

pub fn palette(theme: ThemeChoice) -> &'static Palette {
    match theme {
        ThemeChoice::Dark => &DARK,
        ThemeChoice::Light => &LIGHT,
    }
}

pub const HEADER_HEIGHT: u16 = 1;
pub const HISTORY_HEIGHT: u16 = 1;
pub const INPUT_HEIGHT: u16 = 2;
pub const STATUS_HEIGHT: u16 = 1;
pub const MIN_RESULT_LINES: u16 = 3;
/// Dropdown rows shown at once (plus borders).
pub const DROPDOWN_MAX_ROWS: u16 = 10;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
