//! App state: input line, result pane, history, theme.

use tracing::warn;

use crate::config::STORAGE_KEY_THEME;
use crate::history::History;
use crate::store::Store;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Stored choice, or dark when absent or unrecognised.
    pub fn load(store: &dyn Store) -> Self {
        match store.get(STORAGE_KEY_THEME).as_deref() {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn save(self, store: &mut dyn Store) {
        if let Err(e) = store.set(STORAGE_KEY_THEME, self.as_str().to_string()) {
            warn!(error = %e, "failed to persist theme");
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Result pane: last rendered response for `title`.
#[derive(Clone, Debug, Default)]
pub struct ResultsState {
    pub title: String,
    /// Raw response text, escape sequences included.
    pub content: String,
    pub line_count: usize,
    pub scroll: usize,
    /// Rows the pane showed on the last draw.
    pub viewport: usize,
    pub status: ResultStatus,
}

impl ResultsState {
    pub fn loading(&mut self, title: &str) {
        self.title = title.to_string();
        self.status = ResultStatus::Loading;
    }

    pub fn ready(&mut self, title: String, content: String) {
        self.title = title;
        self.line_count = content.lines().count();
        self.content = content;
        self.scroll = 0;
        self.status = ResultStatus::Ready;
    }

    pub fn failed(&mut self, title: String, message: String) {
        self.title = title;
        self.status = ResultStatus::Failed(message);
    }

    /// First line of the last full page.
    pub fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(self.viewport)
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll.saturating_add_signed(delta);
        self.scroll = next.min(self.max_scroll());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn has_content(&self) -> bool {
        self.status == ResultStatus::Ready && !self.content.is_empty()
    }
}

/// Global app state (single-screen lookup client).
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub input_buffer: String,
    /// Byte offset into `input_buffer`, always on a char boundary.
    pub input_cursor: usize,
    pub results: ResultsState,
    pub history: History,
    pub theme: ThemeChoice,
    /// One-shot status-bar message, cleared on the next key.
    pub notice: Option<String>,
}

impl AppState {
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.input_cursor = self.input_buffer.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let pos = self.input_cursor.min(self.input_buffer.len());
        self.input_buffer.insert(pos, c);
        self.input_cursor = pos + c.len_utf8();
    }

    /// Delete the char before the cursor. Returns whether anything changed.
    pub fn delete_back(&mut self) -> bool {
        let pos = self.input_cursor.min(self.input_buffer.len());
        let Some((prev, _)) = self.input_buffer[..pos].char_indices().next_back() else {
            return false;
        };
        self.input_buffer.remove(prev);
        self.input_cursor = prev;
        true
    }
}
