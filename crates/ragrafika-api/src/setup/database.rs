//! Database pool and schema

use anyhow::{Context, Result};
use ragrafika_core::Config;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Workspace `migrations/`, embedded at compile time so the binary carries its schema.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connect to Postgres and bring `portfolio_photos` up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        migrations = MIGRATOR.iter().count(),
        "Database ready"
    );

    Ok(pool)
}
