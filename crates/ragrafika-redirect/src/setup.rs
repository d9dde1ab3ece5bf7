//! Router and server startup

use crate::handlers;
use crate::RedirectConfig;
use anyhow::Result;
use axum::Router;
use ragrafika_core::shutdown::shutdown_signal;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Every path and method goes to the redirect handler.
pub fn setup_routes(config: Arc<RedirectConfig>) -> Router {
    Router::new()
        .fallback(handlers::redirect)
        .with_state(config)
        .layer(TraceLayer::new_for_http())
}

/// Start the server with graceful shutdown
pub async fn start_server(config: &RedirectConfig, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        canonical_host = %config.canonical_host(),
        environment = %config.environment(),
        "Redirect server ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
