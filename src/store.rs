//! String-keyed local state (theme, history, command cache).
//!
//! Reads never fail: a missing or undecodable file is an empty store. Writes
//! replace the whole file.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::error::StoreError;

pub trait Store: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// All keys in one JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding unreadable state file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// Decode a JSON value stored under `key`, `None` on absence or any decode error.
pub fn load_json<T: serde::de::DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

pub fn save_json<T: serde::Serialize>(
    store: &mut dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = FileStore::open(path.clone());
        store.set("theme", "light".to_string()).unwrap();

        let reopened = FileStore::open(path);
        assert_eq!(reopened.get("theme").as_deref(), Some("light"));
        assert_eq!(reopened.get("missing"), None);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(path);
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn load_json_tolerates_bad_values() {
        let mut store = MemoryStore::default();
        store.set("list", "[\"a\", \"b\"]".to_string()).unwrap();
        store.set("broken", "[\"a\",".to_string()).unwrap();

        let list: Option<Vec<String>> = load_json(&store, "list");
        assert_eq!(list, Some(vec!["a".to_string(), "b".to_string()]));
        let broken: Option<Vec<String>> = load_json(&store, "broken");
        assert_eq!(broken, None);
    }
}
