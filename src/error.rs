//! Error taxonomy for searches, cache refreshes and the local store.

use thiserror::Error;

/// A search that did not produce text to render. Both variants are recoverable;
/// the user resubmits to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No results found")]
    NotFound,
    #[error("{0}")]
    Transport(String),
}

/// The command listing could not be fetched. Logged, never shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command listing refresh failed: {0}")]
pub struct CacheRefreshFailed(pub String);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encoding: {0}")]
    Json(#[from] serde_json::Error),
}
