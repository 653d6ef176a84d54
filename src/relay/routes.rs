use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const ROUTE: &str = "/api/cheat";
const UPSTREAM_USER_AGENT: &str = "curl/7.68.0";

/// Shared relay state.
#[derive(Clone)]
pub struct AppState {
    /// Base URL of the text service, without trailing slash.
    pub upstream: String,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(upstream: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            upstream: upstream.trim_end_matches('/').to_string(),
            client,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "GET, OPTIONS"),
        ("access-control-allow-headers", "Content-Type"),
        ("access-control-max-age", "86400"),
    ];
    let mut router = Router::new()
        .route(ROUTE, get(cheat).options(preflight))
        .with_state(state);
    for (name, value) in cors {
        router = router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    router.layer(TraceLayer::new_for_http())
}

/// `OPTIONS /api/cheat`
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /api/cheat?q=<query>`: relay the upstream text with its status.
async fn cheat(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Response {
    let Some(query) = params.get("q").filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing query parameter",
                "usage": "/api/cheat?q=tar",
                "examples": ["?q=tar", "?q=python/list", "?q=go/:learn"],
            })),
        )
            .into_response();
    };

    let url = format!("{}/{}", state.upstream, urlencoding::encode(query));
    match fetch_upstream(&state.client, &url).await {
        Ok((status, text)) => {
            info!(query = %query, status = status.as_u16(), "relayed");
            (
                status,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (header::CACHE_CONTROL, "public, max-age=3600"),
                ],
                text,
            )
                .into_response()
        }
        Err(e) => {
            warn!(query = %query, error = %e, "upstream fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch from cheat.sh",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

async fn fetch_upstream(
    client: &reqwest::Client,
    url: &str,
) -> Result<(StatusCode, String), reqwest::Error> {
    let resp = client
        .get(url)
        .header(reqwest::header::USER_AGENT, UPSTREAM_USER_AGENT)
        .header(reqwest::header::ACCEPT, "text/plain")
        .send()
        .await?;
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let text = resp.text().await?;
    Ok((status, text))
}
