//! Storage setup and initialization

use anyhow::{Context, Result};
use ragrafika_core::Config;
use ragrafika_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(
        backend = %storage.backend_type(),
        public_base_url = ?config.public_base_url(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
