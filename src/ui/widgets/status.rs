//! Status bar: state on the left, shortcuts on the right.

use ratatui::{style::Style, text::Span, widgets::Paragraph, Frame};

use crate::ui::theme::Palette;

const SHORTCUTS: &str = " ↑↓ select  Enter search  Esc close  ^T theme  ^Y copy  ^C quit ";

pub fn render(
    f: &mut Frame,
    area: ratatui::prelude::Rect,
    palette: &Palette,
    loading: bool,
    notice: Option<&str>,
    spinner_char: char,
) {
    let left = match (loading, notice) {
        (true, _) => format!(" {spinner_char} Searching…"),
        (false, Some(n)) => format!(" {n}"),
        (false, None) => " Ready".to_string(),
    };
    let width = area.width as usize;
    let pad = width.saturating_sub(left.chars().count() + SHORTCUTS.chars().count());
    let line = format!("{}{}{}", left, " ".repeat(pad), SHORTCUTS);
    let span = Span::styled(line, Style::default().fg(palette.muted).bg(palette.elevated));
    f.render_widget(Paragraph::new(span), area);
}
