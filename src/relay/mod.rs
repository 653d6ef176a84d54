//! Same-origin relay: forwards `?q=` to the text service and attaches CORS headers.

pub mod routes;

use std::net::SocketAddr;

use tracing::info;

use crate::config::REQUEST_TIMEOUT;
use routes::{build_router, AppState};

pub async fn serve(addr: SocketAddr, upstream: &str) -> anyhow::Result<()> {
    let app = build_router(AppState::new(upstream, REQUEST_TIMEOUT)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, upstream, route = routes::ROUTE, "relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
