//! HTTP client for the relay (`GET <endpoint>?q=<query>`).

use tracing::debug;

use crate::cache::{parse_listing, CommandSet};
use crate::config::{LIST_QUERY, REQUEST_TIMEOUT};
use crate::error::{CacheRefreshFailed, SearchError};

#[derive(Clone, Debug)]
pub struct RelayClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(endpoint: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { endpoint, client })
    }

    /// Fetch the cheat sheet for `query`. An empty body is `NotFound`.
    pub async fn fetch(&self, query: &str) -> Result<String, SearchError> {
        debug!(query, "relay request");
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Transport(format!("HTTP {}", status.as_u16())));
        }
        let text = resp
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(SearchError::NotFound);
        }
        Ok(text)
    }

    /// Fetch and parse the full command listing.
    pub async fn list_commands(&self) -> Result<CommandSet, CacheRefreshFailed> {
        match self.fetch(LIST_QUERY).await {
            Ok(text) => Ok(parse_listing(&text)),
            Err(SearchError::NotFound) => Ok(CommandSet::new()),
            Err(SearchError::Transport(msg)) => Err(CacheRefreshFailed(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;

    async fn stub(params: Query<HashMap<String, String>>) -> (StatusCode, String) {
        match params.get("q").map(String::as_str) {
            Some(":list") => (StatusCode::OK, "tar\n\ncurl\ngit\n".into()),
            Some("tar") => (StatusCode::OK, "# tar\ntar -xvf file.tar\n".into()),
            Some("blank") => (StatusCode::OK, "  \n".into()),
            Some("with space") => (StatusCode::OK, "spaced".into()),
            _ => (StatusCode::BAD_GATEWAY, String::new()),
        }
    }

    async fn spawn_stub() -> String {
        let app = axum::Router::new().route("/api/cheat", get(stub));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/cheat")
    }

    #[tokio::test]
    async fn fetch_returns_body() {
        let client = RelayClient::new(spawn_stub().await).unwrap();
        let text = client.fetch("tar").await.unwrap();
        assert!(text.contains("tar -xvf"));
        assert_eq!(client.fetch("with space").await.unwrap(), "spaced");
    }

    #[tokio::test]
    async fn blank_body_is_not_found() {
        let client = RelayClient::new(spawn_stub().await).unwrap();
        assert_eq!(client.fetch("blank").await, Err(SearchError::NotFound));
    }

    #[tokio::test]
    async fn error_status_is_transport() {
        let client = RelayClient::new(spawn_stub().await).unwrap();
        assert_eq!(
            client.fetch("nope").await,
            Err(SearchError::Transport("HTTP 502".into()))
        );
    }

    #[tokio::test]
    async fn unreachable_relay_is_transport() {
        let client = RelayClient::new("http://127.0.0.1:1/api/cheat".into()).unwrap();
        assert!(matches!(client.fetch("tar").await, Err(SearchError::Transport(_))));
        assert!(client.list_commands().await.is_err());
    }

    #[tokio::test]
    async fn listing_is_parsed() {
        let client = RelayClient::new(spawn_stub().await).unwrap();
        assert_eq!(client.list_commands().await.unwrap(), vec!["tar", "curl", "git"]);
    }
}
