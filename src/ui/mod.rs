//! UI layer: layout, theme, ANSI rendering, renderer, widgets.

mod ansi;
mod layout;
mod renderer;
mod theme;

pub mod widgets;

pub use layout::results_viewport;
pub use renderer::render;
