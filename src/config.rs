//! Tunables, store keys, and the resolved client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Most-recent-first history capacity.
pub const MAX_HISTORY: usize = 10;
/// Suggestion dropdown cap, applied after ranking.
pub const MAX_SUGGESTIONS: usize = 50;
/// Command listing lifetime: 7 days.
pub const CACHE_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;
/// Query that returns the newline-separated command listing.
pub const LIST_QUERY: &str = ":list";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const STORAGE_KEY_HISTORY: &str = "cheatsh_history_md3";
pub const STORAGE_KEY_THEME: &str = "cheatsh_theme_md3";
pub const STORAGE_KEY_COMMANDS: &str = "cheatsh_commands";
pub const STORAGE_KEY_COMMANDS_TS: &str = "cheatsh_commands_ts";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/api/cheat";
pub const DEFAULT_UPSTREAM: &str = "https://cheat.sh";

/// Example queries listed on the welcome screen.
pub const QUICK_QUERIES: &[&str] = &["tar", "curl", "git", "python/list", ":help"];

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub endpoint: String,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(endpoint: String, data_dir: Option<PathBuf>) -> Self {
        Self {
            endpoint,
            data_dir: data_dir.unwrap_or_else(default_data_dir),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("cheatsh.log")
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cheatsh-tui")
}
