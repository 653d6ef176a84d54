//! TUI widgets: header, results, history, input, suggestions, status.

mod header;
mod history;
mod input;
mod results;
mod status;
mod suggestions;

pub use header::render as render_header;
pub use history::render as render_history;
pub use input::render as render_input;
pub use results::render as render_results;
pub use status::render as render_status;
pub use suggestions::render as render_suggestions;
