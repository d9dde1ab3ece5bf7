//! Tracing setup shared by the api and redirect binaries.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "ragrafika=debug,tower_http=debug";

/// `RUST_LOG` when set, otherwise debug for our crates and tower_http.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialize tracing. `log_format` is `json` for structured output, anything else
/// gives the compact console format.
pub fn init_telemetry(log_format: &str) -> Result<(), anyhow::Error> {
    let json = log_format.eq_ignore_ascii_case("json");

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let console_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        )
    });

    tracing_subscriber::registry()
        .with(default_filter())
        .with(json_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(log_format = %log_format, "Tracing initialized");
    Ok(())
}
