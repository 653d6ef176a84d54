//! Recently committed queries, most recent first.

use tracing::warn;

use crate::config::{MAX_HISTORY, STORAGE_KEY_HISTORY};
use crate::store::{load_json, save_json, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn load(store: &dyn Store) -> Self {
        let mut entries: Vec<String> = load_json(store, STORAGE_KEY_HISTORY).unwrap_or_default();
        entries.truncate(MAX_HISTORY);
        Self { entries }
    }

    pub fn save(&self, store: &mut dyn Store) {
        if let Err(e) = save_json(store, STORAGE_KEY_HISTORY, &self.entries) {
            warn!(error = %e, "failed to persist history");
        }
    }

    /// Move `query` to the front, dropping any older copy and the oldest overflow.
    pub fn push(&mut self, query: &str) {
        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
