use std::collections::HashMap;
use std::env;

const SERVER_PORT: u16 = 4001;
const DEFAULT_CANONICAL_HOST: &str = "ragrafika.ru";

/// Redirect server configuration
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    server_port: u16,
    environment: String,
    log_format: String,
    canonical_host: String,
}

impl RedirectConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build from an explicit key/value map (tests, embedding).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_source(|key| vars.get(key).cloned())
    }

    fn from_source<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let canonical_host = get("CANONICAL_HOST")
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_CANONICAL_HOST.to_string());

        if canonical_host.contains("://") || canonical_host.contains('/') {
            return Err(anyhow::anyhow!(
                "CANONICAL_HOST must be a bare host name, got {}",
                canonical_host
            ));
        }

        Ok(RedirectConfig {
            server_port: get("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment: get("ENVIRONMENT")
                .or_else(|| get("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
            log_format: get("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
            canonical_host,
        })
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn log_format(&self) -> &str {
        &self.log_format
    }

    pub fn canonical_host(&self) -> &str {
        &self.canonical_host
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        RedirectConfig {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: "compact".to_string(),
            canonical_host: DEFAULT_CANONICAL_HOST.to_string(),
        }
    }
}
