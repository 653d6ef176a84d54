//! Suggestion dropdown: matched segment emphasised, accent bar on the highlighted row.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::selection::SelectionController;
use crate::ui::theme::Palette;

pub fn render(
    f: &mut Frame,
    selection: &SelectionController,
    area: ratatui::prelude::Rect,
    palette: &Palette,
) {
    let items = selection.suggestions();
    if !selection.is_visible() || items.is_empty() {
        return;
    }
    let block = Block::default()
        .title(format!(" {} matches ", items.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.elevated));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = inner.height as usize;
    let highlighted = selection.highlighted().unwrap_or(0);
    // Keep the highlighted row in view.
    let offset = (highlighted + 1).saturating_sub(rows);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, s)| {
            let selected = selection.highlighted() == Some(i);
            let (before, matched, after) = s.segments();
            let text = Style::default().fg(if selected { palette.text } else { palette.text_dim });
            let row = if selected {
                Style::default().bg(palette.selection)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(if selected { "▎ " } else { "  " }, Style::default().fg(palette.accent)),
                Span::styled(before, text),
                Span::styled(
                    matched,
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(after, text),
            ])
            .style(row)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
