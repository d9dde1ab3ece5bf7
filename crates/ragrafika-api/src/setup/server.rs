//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use ragrafika_core::shutdown::shutdown_signal;
use ragrafika_core::Config;

/// Start the server with graceful shutdown
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        poll_interval_ms = config.stylize().poll_interval.as_millis() as u64,
        max_poll_attempts = config.stylize().max_poll_attempts,
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
