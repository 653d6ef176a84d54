//! Time-boxed cache of the full command listing.
//!
//! Readers always get whatever listing is on hand, stale or not. Refreshing is
//! split into a synchronous trigger ([`CommandCache::begin_refresh`]) and a
//! completion ([`CommandCache::complete_refresh`]) so that at most one fetch is
//! ever in flight; the caller runs the fetch itself in between.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{CACHE_TTL_MS, STORAGE_KEY_COMMANDS, STORAGE_KEY_COMMANDS_TS};
use crate::error::CacheRefreshFailed;
use crate::store::{load_json, save_json, Store};

pub type CommandSet = Vec<String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub commands: Arc<CommandSet>,
    pub fetched_at_ms: u64,
}

impl CacheEntry {
    pub fn is_stale(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.fetched_at_ms) >= CACHE_TTL_MS
    }
}

#[derive(Debug, Default)]
pub struct CommandCache {
    entry: Option<CacheEntry>,
    /// Start time of the refresh in flight, if any.
    in_flight: Option<u64>,
}

impl CommandCache {
    /// Restore the persisted entry. Any missing or malformed key means no entry.
    pub fn load(store: &dyn Store) -> Self {
        let commands: Option<CommandSet> = load_json(store, STORAGE_KEY_COMMANDS);
        let fetched_at_ms = store
            .get(STORAGE_KEY_COMMANDS_TS)
            .and_then(|ts| ts.trim().parse::<u64>().ok());
        let entry = match (commands, fetched_at_ms) {
            (Some(commands), Some(fetched_at_ms)) => Some(CacheEntry {
                commands: Arc::new(commands),
                fetched_at_ms,
            }),
            _ => None,
        };
        if let Some(e) = &entry {
            debug!(count = e.commands.len(), fetched_at_ms = e.fetched_at_ms, "loaded command cache");
        }
        Self { entry, in_flight: None }
    }

    pub fn get(&self) -> Arc<CommandSet> {
        self.entry
            .as_ref()
            .map(|e| Arc::clone(&e.commands))
            .unwrap_or_default()
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn needs_refresh(&self, now_ms: u64) -> bool {
        self.entry.as_ref().map_or(true, |e| e.is_stale(now_ms))
    }

    /// Claim the refresh slot. `false` when fresh or when a refresh is already running.
    pub fn begin_refresh(&mut self, now_ms: u64) -> bool {
        if self.in_flight.is_some() || !self.needs_refresh(now_ms) {
            return false;
        }
        self.in_flight = Some(now_ms);
        true
    }

    /// Finish the refresh claimed by `begin_refresh`. A failure keeps the old entry.
    pub fn complete_refresh(
        &mut self,
        result: Result<CommandSet, CacheRefreshFailed>,
        store: &mut dyn Store,
    ) {
        let Some(started_at) = self.in_flight.take() else {
            debug!("ignoring refresh completion with no refresh in flight");
            return;
        };
        match result {
            Ok(commands) => {
                let fetched_at_ms = self
                    .entry
                    .as_ref()
                    .map_or(started_at, |e| e.fetched_at_ms.max(started_at));
                info!(count = commands.len(), "command listing refreshed");
                let entry = CacheEntry {
                    commands: Arc::new(commands),
                    fetched_at_ms,
                };
                persist(&entry, store);
                self.entry = Some(entry);
            }
            Err(e) => warn!(error = %e, "keeping previous command listing"),
        }
    }
}

fn persist(entry: &CacheEntry, store: &mut dyn Store) {
    let result = save_json(store, STORAGE_KEY_COMMANDS, entry.commands.as_ref())
        .and_then(|()| store.set(STORAGE_KEY_COMMANDS_TS, entry.fetched_at_ms.to_string()));
    if let Err(e) = result {
        warn!(error = %e, "failed to persist command cache");
    }
}

/// Turn the raw `:list` body into commands, dropping blank lines.
pub fn parse_listing(text: &str) -> CommandSet {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const T0: u64 = 1_700_000_000_000;

    fn fresh_cache(store: &mut MemoryStore, commands: &[&str], at: u64) -> CommandCache {
        let mut cache = CommandCache::default();
        assert!(cache.begin_refresh(at));
        cache.complete_refresh(Ok(commands.iter().map(|s| s.to_string()).collect()), store);
        cache
    }

    #[test]
    fn stale_exactly_at_ttl() {
        let entry = CacheEntry {
            commands: Arc::default(),
            fetched_at_ms: T0,
        };
        assert!(!entry.is_stale(T0 + CACHE_TTL_MS - 1));
        assert!(entry.is_stale(T0 + CACHE_TTL_MS));
    }

    #[test]
    fn empty_cache_needs_refresh_and_serves_nothing() {
        let cache = CommandCache::default();
        assert!(cache.get().is_empty());
        assert!(cache.needs_refresh(T0));
    }

    #[test]
    fn single_refresh_in_flight() {
        let mut cache = CommandCache::default();
        assert!(cache.begin_refresh(T0));
        assert!(!cache.begin_refresh(T0 + 1));
        assert!(cache.is_refreshing());
    }

    #[test]
    fn fresh_entry_does_not_refresh() {
        let mut store = MemoryStore::default();
        let mut cache = fresh_cache(&mut store, &["tar"], T0);
        assert!(!cache.begin_refresh(T0 + CACHE_TTL_MS - 1));
        assert!(cache.begin_refresh(T0 + CACHE_TTL_MS));
    }

    #[test]
    fn success_replaces_and_persists() {
        let mut store = MemoryStore::default();
        let cache = fresh_cache(&mut store, &["tar", "tail"], T0);
        assert_eq!(cache.get().as_slice(), ["tar", "tail"]);

        let restored = CommandCache::load(&store);
        assert_eq!(restored.entry(), cache.entry());
        assert_eq!(
            store.entries.get(STORAGE_KEY_COMMANDS_TS).map(String::as_str),
            Some("1700000000000")
        );
    }

    #[test]
    fn failure_keeps_stale_entry() {
        let mut store = MemoryStore::default();
        let mut cache = fresh_cache(&mut store, &["tar"], T0);
        let later = T0 + CACHE_TTL_MS;
        assert!(cache.begin_refresh(later));
        cache.complete_refresh(Err(CacheRefreshFailed("HTTP 502".into())), &mut store);

        assert!(!cache.is_refreshing());
        assert_eq!(cache.get().as_slice(), ["tar"]);
        assert_eq!(cache.entry().map(|e| e.fetched_at_ms), Some(T0));
    }

    #[test]
    fn timestamp_never_moves_backwards() {
        let mut store = MemoryStore::default();
        let mut cache = fresh_cache(&mut store, &["tar"], T0);
        // Refresh that started before the current entry was fetched.
        let mut skewed = CommandCache {
            entry: cache.entry.clone(),
            in_flight: Some(T0 - 5),
        };
        skewed.complete_refresh(Ok(vec!["curl".into()]), &mut store);
        assert_eq!(skewed.entry().map(|e| e.fetched_at_ms), Some(T0));

        assert!(cache.begin_refresh(T0 + CACHE_TTL_MS));
        cache.complete_refresh(Ok(vec!["git".into()]), &mut store);
        assert_eq!(cache.entry().map(|e| e.fetched_at_ms), Some(T0 + CACHE_TTL_MS));
    }

    #[test]
    fn readers_keep_their_snapshot_across_refresh() {
        let mut store = MemoryStore::default();
        let mut cache = fresh_cache(&mut store, &["tar"], T0);
        let snapshot = cache.get();
        assert!(cache.begin_refresh(T0 + CACHE_TTL_MS));
        cache.complete_refresh(Ok(vec!["git".into()]), &mut store);
        assert_eq!(snapshot.as_slice(), ["tar"]);
        assert_eq!(cache.get().as_slice(), ["git"]);
    }

    #[test]
    fn partial_store_means_no_entry() {
        let mut store = MemoryStore::default();
        store
            .set(STORAGE_KEY_COMMANDS, r#"["tar"]"#.to_string())
            .unwrap();
        store
            .set(STORAGE_KEY_COMMANDS_TS, "yesterday".to_string())
            .unwrap();
        assert!(CommandCache::load(&store).entry().is_none());
    }

    #[test]
    fn listing_drops_blank_lines() {
        let parsed = parse_listing("tar\n\n  \ncurl\r\ngit\n");
        assert_eq!(parsed, vec!["tar", "curl", "git"]);
        assert!(parse_listing("").is_empty());
    }
}
