//! ANSI SGR colour codes to ratatui lines.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;

use crate::services::strip_ansi;

const TAB: &str = "    ";

fn sgr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b\[([0-9;]*)m").unwrap_or_else(|e| panic!("sgr pattern: {e}"))
    })
}

/// Convert raw terminal text into styled lines. Styles carry across line breaks;
/// escape sequences other than SGR are dropped.
pub fn to_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut style = base;
    text.lines()
        .map(|raw| {
            let mut spans = Vec::new();
            let mut last = 0;
            for cap in sgr_pattern().captures_iter(raw) {
                let Some(m) = cap.get(0) else { continue };
                push_text(&mut spans, &raw[last..m.start()], style);
                style = apply_sgr(style, base, &cap[1]);
                last = m.end();
            }
            push_text(&mut spans, &raw[last..], style);
            Line::from(spans)
        })
        .collect()
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    let clean = strip_ansi(text).replace('\t', TAB);
    if !clean.is_empty() {
        spans.push(Span::styled(clean, style));
    }
}

fn apply_sgr(mut style: Style, base: Style, params: &str) -> Style {
    let codes: Vec<u16> = if params.is_empty() {
        vec![0]
    } else {
        params.split(';').map(|p| p.parse().unwrap_or(0)).collect()
    };
    let mut it = codes.into_iter();
    while let Some(code) = it.next() {
        style = match code {
            0 => base,
            1 => style.add_modifier(Modifier::BOLD),
            2 => style.add_modifier(Modifier::DIM),
            3 => style.add_modifier(Modifier::ITALIC),
            4 => style.add_modifier(Modifier::UNDERLINED),
            7 => style.add_modifier(Modifier::REVERSED),
            22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style.remove_modifier(Modifier::ITALIC),
            24 => style.remove_modifier(Modifier::UNDERLINED),
            27 => style.remove_modifier(Modifier::REVERSED),
            30..=37 => style.fg(basic(code - 30, false)),
            90..=97 => style.fg(basic(code - 90, true)),
            39 => Style { fg: base.fg, ..style },
            40..=47 => style.bg(basic(code - 40, false)),
            100..=107 => style.bg(basic(code - 100, true)),
            49 => Style { bg: base.bg, ..style },
            38 => extended(&mut it).map_or(style, |c| style.fg(c)),
            48 => extended(&mut it).map_or(style, |c| style.bg(c)),
            _ => style,
        };
    }
    style
}

/// `5;n` (256-colour) or `2;r;g;b` (truecolour) following a 38/48.
fn extended(it: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match it.next()? {
        5 => Some(Color::Indexed(it.next()? as u8)),
        2 => {
            let (r, g, b) = (it.next()?, it.next()?, it.next()?);
            Some(Color::Rgb(r as u8, g as u8, b as u8))
        }
        _ => None,
    }
}

fn basic(n: u16, bright: bool) -> Color {
    match (n, bright) {
        (0, false) => Color::Black,
        (1, false) => Color::Red,
        (2, false) => Color::Green,
        (3, false) => Color::Yellow,
        (4, false) => Color::Blue,
        (5, false) => Color::Magenta,
        (6, false) => Color::Cyan,
        (7, false) => Color::Gray,
        (0, true) => Color::DarkGray,
        (1, true) => Color::LightRed,
        (2, true) => Color::LightGreen,
        (3, true) => Color::LightYellow,
        (4, true) => Color::LightBlue,
        (5, true) => Color::LightMagenta,
        (6, true) => Color::LightCyan,
        _ => Color::White,
    }
}
