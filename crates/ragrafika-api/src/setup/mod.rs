//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::stylization::Stylizer;
use crate::state::AppState;
use anyhow::{Context, Result};
use ragrafika_core::Config;
use ragrafika_db::PhotoRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    ragrafika_core::telemetry::init_telemetry(config.log_format())?;

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let stylizer =
        Stylizer::new(config.stylize()).context("Failed to build stylization client")?;

    let state = Arc::new(AppState::new(
        Arc::new(PhotoRepository::new(pool)),
        storage,
        stylizer,
    ));

    let router = routes::setup_routes(state.clone(), config.max_upload_size_bytes());

    Ok((state, router))
}
