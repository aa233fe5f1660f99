//! `unfurl serve` – HTTP front end for the orchestrator.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use unfurl_core::config::UnfurlConfig;
use unfurl_core::Unfurler;

/// Every method and path lands here; only `target` and `Origin` matter.
async fn unfurl_route(State(unfurler): State<Arc<Unfurler>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let request = axum::http::Request::from_parts(parts, ());
    let handled = unfurler.handle(&request).await;
    // Dropping the handle leaves the cache store running in the background.
    drop(handled.store);
    handled.response.map(Body::from)
}

pub fn router(unfurler: Arc<Unfurler>) -> Router {
    Router::new().fallback(unfurl_route).with_state(unfurler)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

pub async fn run_serve(cfg: &UnfurlConfig, listen: Option<SocketAddr>) -> Result<()> {
    let addr = listen.unwrap_or(cfg.listen);
    let unfurler = Arc::new(Unfurler::from_config(cfg));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("unfurl listening on {}", addr);
    println!("unfurl listening on http://{}", addr);

    axum::serve(listener, router(unfurler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
