//! Input bar: prompt and cursor.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

const PROMPT: &str = " ▸ ";

pub fn render(
    f: &mut Frame,
    buffer: &str,
    cursor_pos: usize,
    area: ratatui::prelude::Rect,
    palette: &Palette,
) {
    let line = ratatui::text::Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(buffer, Style::default().fg(palette.text)),
    ]);
    let block = Block::default()
        .style(Style::default().bg(palette.elevated))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.border))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(line), inner);

    let typed = buffer.get(..cursor_pos).map(|s| s.chars().count()).unwrap_or(0) as u16;
    let cursor_x = inner.x + PROMPT.chars().count() as u16 + typed;
    let x = cursor_x.min(inner.x + inner.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y: inner.y });
}
