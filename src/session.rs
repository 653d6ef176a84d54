//! Search submissions and their outcomes.
//!
//! Every submission gets a fresh, increasing token and its own request. Only
//! the response to the most recently issued token is rendered; anything older
//! that resolves later is dropped.

use tracing::debug;

use crate::error::SearchError;
use crate::history::History;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSearch {
    pub token: RequestToken,
    pub query: String,
}

/// A response that is still current.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub query: String,
    pub result: Result<String, SearchError>,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    latest: RequestToken,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim and issue a new request token. Blank input is ignored.
    pub fn begin(&mut self, raw: &str) -> Option<PendingSearch> {
        let query = raw.trim();
        if query.is_empty() {
            return None;
        }
        self.latest = RequestToken(self.latest.0 + 1);
        Some(PendingSearch {
            token: self.latest,
            query: query.to_string(),
        })
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token == self.latest
    }

    /// Accept a response. Superseded responses return `None`; a current success
    /// is recorded in `history`.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        query: String,
        result: Result<String, SearchError>,
        history: &mut History,
    ) -> Option<SearchOutcome> {
        if !self.is_latest(token) {
            debug!(?token, query, "dropping superseded search response");
            return None;
        }
        if result.is_ok() {
            history.push(&query);
        }
        Some(SearchOutcome { query, result })
    }
}
