//! Recent searches as a single row of numbered chips (Alt+digit reruns).

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::history::History;
use crate::ui::theme::Palette;

pub fn render(f: &mut Frame, history: &History, area: ratatui::prelude::Rect, palette: &Palette) {
    let mut spans = vec![Span::styled(" Recent ", Style::default().fg(palette.muted))];
    if history.is_empty() {
        spans.push(Span::styled("(none)", Style::default().fg(palette.muted)));
    }
    for (i, q) in history.entries().iter().enumerate() {
        spans.push(Span::styled(
            format!(" {}:", (i + 1) % 10),
            Style::default().fg(palette.accent_soft),
        ));
        spans.push(Span::styled(q.as_str(), Style::default().fg(palette.text_dim)));
    }
    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.elevated));
    f.render_widget(para, area);
}
