//! Header line: name, version, command listing state.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Palette;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(
    f: &mut Frame,
    area: ratatui::prelude::Rect,
    palette: &Palette,
    command_count: usize,
    refreshing: bool,
) {
    let left = format!(" cheat.sh  v{VERSION}");
    let right = if refreshing {
        "syncing commands… ".to_string()
    } else {
        format!("{command_count} commands ")
    };
    let pad = (area.width as usize).saturating_sub(left.chars().count() + right.chars().count());
    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(palette.muted)),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.elevated)),
        area,
    );
}
