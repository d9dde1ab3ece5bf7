//! Configuration module
//!
//! Configuration for the portfolio API: server, database, object storage and the
//! image stylization provider. Values come from the process environment (with an
//! optional `.env` file loaded by dotenvy).

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 25;
const DEFAULT_S3_BUCKET: &str = "files";
const DEFAULT_S3_REGION: &str = "us-east-1";
const DEFAULT_S3_ENDPOINT: &str = "https://bucket.poehali.dev";
const DEFAULT_CDN_BASE: &str = "https://cdn.poehali.dev/projects";
const DEFAULT_YANDEX_ART_BASE_URL: &str = "https://llm.api.cloud.yandex.net";
const STYLIZE_POLL_INTERVAL_MS: u64 = 2000;
const STYLIZE_MAX_POLL_ATTEMPTS: u32 = 30;

/// Settings shared by every server binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_upload_size_bytes: usize,
}

/// Settings for the third-party stylization provider (Yandex ART)
#[derive(Clone, Debug)]
pub struct StylizeSettings {
    pub api_key: Option<String>,
    pub folder_id: Option<String>,
    pub base_url: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl StylizeSettings {
    /// API key and folder id, only when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.folder_id.as_deref()) {
            (Some(key), Some(folder)) if !key.is_empty() && !folder.is_empty() => {
                Some((key, folder))
            }
            _ => None,
        }
    }
}

/// Portfolio API configuration
#[derive(Clone, Debug)]
pub struct PortfolioConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub public_base_url: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub stylize: StylizeSettings,
}

/// Application configuration (portfolio API).
#[derive(Clone, Debug)]
pub struct Config(pub Box<PortfolioConfig>);

impl Config {
    fn as_portfolio(&self) -> &PortfolioConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PortfolioConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_portfolio().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_portfolio().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_portfolio().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_portfolio().base.log_format
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_portfolio().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_portfolio().base.db_timeout_seconds
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_portfolio().base.max_upload_size_bytes
    }

    pub fn database_url(&self) -> &str {
        &self.as_portfolio().database_url
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_portfolio().storage_backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.as_portfolio().s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.as_portfolio().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_portfolio().s3_endpoint.as_deref()
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.as_portfolio().public_base_url.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_portfolio().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_portfolio().local_storage_base_url.as_deref()
    }

    pub fn stylize(&self) -> &StylizeSettings {
        &self.as_portfolio().stylize
    }
}

impl PortfolioConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_source(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build from an explicit key/value map (tests, embedding).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_source(|key| vars.get(key).cloned())
    }

    fn from_source<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_upload_size_mb = get("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let base = BaseConfig {
            server_port: get("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            log_format: get("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: get("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(value) => Some(value.parse::<StorageBackend>()?),
            None => None,
        };

        let aws_access_key_id = get("AWS_ACCESS_KEY_ID").filter(|s| !s.is_empty());

        // The CDN serves objects under the project's access key
        let public_base_url = get("PUBLIC_BASE_URL")
            .filter(|s| !s.is_empty())
            .or_else(|| {
                aws_access_key_id
                    .as_ref()
                    .map(|key| format!("{}/{}/bucket", DEFAULT_CDN_BASE, key))
            });

        let stylize = StylizeSettings {
            api_key: get("YANDEX_API_KEY").filter(|s| !s.is_empty()),
            folder_id: get("YANDEX_FOLDER_ID").filter(|s| !s.is_empty()),
            base_url: get("YANDEX_ART_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YANDEX_ART_BASE_URL.to_string()),
            poll_interval: Duration::from_millis(
                get("STYLIZE_POLL_INTERVAL_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(STYLIZE_POLL_INTERVAL_MS),
            ),
            max_poll_attempts: get("STYLIZE_MAX_POLL_ATTEMPTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(STYLIZE_MAX_POLL_ATTEMPTS),
        };

        Ok(PortfolioConfig {
            base,
            database_url: get("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage_backend,
            s3_bucket: get("S3_BUCKET").unwrap_or_else(|| DEFAULT_S3_BUCKET.to_string()),
            s3_region: get("S3_REGION")
                .or_else(|| get("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
            s3_endpoint: get("S3_ENDPOINT")
                .or_else(|| Some(DEFAULT_S3_ENDPOINT.to_string()))
                .filter(|s| !s.is_empty()),
            aws_access_key_id,
            aws_secret_access_key: get("AWS_SECRET_ACCESS_KEY").filter(|s| !s.is_empty()),
            public_base_url,
            local_storage_path: get("LOCAL_STORAGE_PATH"),
            local_storage_base_url: get("LOCAL_STORAGE_BASE_URL"),
            stylize,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.stylize.max_poll_attempts == 0 {
            return Err(anyhow::anyhow!(
                "STYLIZE_MAX_POLL_ATTEMPTS must be greater than zero"
            ));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.aws_access_key_id.is_none() || self.aws_secret_access_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
