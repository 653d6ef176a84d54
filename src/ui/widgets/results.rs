//! Result pane: welcome text, spinner, error, or the rendered cheat sheet.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::QUICK_QUERIES;
use crate::state::{ResultStatus, ResultsState};
use crate::ui::ansi;
use crate::ui::theme::Palette;

fn welcome(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Type a command and press Enter.",
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(Span::styled("Try:", Style::default().fg(palette.text_dim))),
    ];
    for q in QUICK_QUERIES {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(palette.muted)),
            Span::styled(*q, Style::default().fg(palette.accent_soft)),
        ]));
    }
    lines
}

pub fn render(
    f: &mut Frame,
    results: &ResultsState,
    area: ratatui::prelude::Rect,
    palette: &Palette,
    spinner_char: char,
) {
    let title = if results.title.is_empty() {
        " cheat.sh ".to_string()
    } else {
        format!(" {} ", results.title)
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(palette.accent_soft).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let base = Style::default().fg(palette.text).bg(palette.bg);
    let lines: Vec<Line<'static>> = match &results.status {
        ResultStatus::Idle => welcome(palette),
        ResultStatus::Loading => vec![Line::from(vec![
            Span::styled(format!("{spinner_char} "), Style::default().fg(palette.accent)),
            Span::styled(format!("Fetching {}…", results.title), Style::default().fg(palette.text)),
        ])],
        ResultStatus::Failed(msg) => vec![Line::from(vec![
            Span::styled("Error: ", Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
            Span::styled(msg.clone(), Style::default().fg(palette.text)),
        ])],
        ResultStatus::Ready => ansi::to_lines(&results.content, base),
    };

    let height = inner.height as usize;
    let scroll = results.scroll.min(lines.len().saturating_sub(height));
    let visible: Vec<Line<'static>> = lines.into_iter().skip(scroll).take(height).collect();
    f.render_widget(Paragraph::new(visible).style(base), inner);
}
