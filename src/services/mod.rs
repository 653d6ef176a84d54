//! Services: clock, ANSI stripping, clipboard.

mod clipboard;
mod util;

pub use clipboard::copy_text;
pub use util::{now_epoch_ms, strip_ansi};
