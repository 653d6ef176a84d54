//! Single-screen render: header, results, history, input, status, dropdown overlay.

use ratatui::Frame;

use crate::app::App;
use crate::ui::layout;
use crate::ui::theme::{palette, SPINNER};
use crate::ui::widgets::{
    render_header, render_history, render_input, render_results, render_status, render_suggestions,
};

pub fn render(f: &mut Frame, app: &App, tick: usize) {
    let regions = layout::compute(f.area());
    let palette = palette(app.state.theme);
    let spinner_char = SPINNER[tick % SPINNER.len()];

    render_header(
        f,
        regions.header,
        palette,
        app.cache.get().len(),
        app.cache.is_refreshing(),
    );
    render_results(f, &app.state.results, regions.results, palette, spinner_char);
    render_history(f, &app.state.history, regions.history, palette);
    render_input(
        f,
        &app.state.input_buffer,
        app.state.input_cursor,
        regions.input,
        palette,
    );
    render_status(
        f,
        regions.status,
        palette,
        app.is_loading(),
        app.state.notice.as_deref(),
        spinner_char,
    );

    if app.selection.is_visible() {
        let area = layout::dropdown_rect(regions.results, app.selection.suggestions().len());
        render_suggestions(f, &app.selection, area, palette);
    }
}
