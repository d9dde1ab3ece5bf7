//! Photo stylization pipeline
//!
//! submit generation job → poll for completion → store the result → record it.
//! Every failure is returned as a `StylizeError`; callers decide how to report it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ragrafika_core::{AppError, StylizeSettings};
use ragrafika_db::PhotoStore;
use ragrafika_services::{random_seed, GenerationRequest, YandexArtClient, YandexArtError};
use ragrafika_storage::{Storage, StorageError};
use std::time::Duration;

const STYLED_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub enum StylizeError {
    #[error("YANDEX_API_KEY or YANDEX_FOLDER_ID not configured")]
    MissingCredentials,

    #[error(transparent)]
    Generation(#[from] YandexArtError),

    #[error("Generated image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to store stylized image: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to record stylized image: {0}")]
    Database(#[from] AppError),
}

impl StylizeError {
    /// Short machine-friendly reason for logs
    pub fn reason(&self) -> &'static str {
        match self {
            StylizeError::MissingCredentials => "missing_credentials",
            StylizeError::Generation(YandexArtError::Timeout { .. }) => "timeout",
            StylizeError::Generation(YandexArtError::Api { .. }) => "api_error",
            StylizeError::Generation(_) => "generation_failed",
            StylizeError::Decode(_) => "invalid_image",
            StylizeError::Storage(_) => "storage",
            StylizeError::Database(_) => "database",
        }
    }
}

/// The photo being stylized
#[derive(Debug, Clone, Copy)]
pub struct StylizeTarget<'a> {
    pub photo_id: i64,
    pub original_url: &'a str,
    pub styled_key: &'a str,
    pub prompt: &'a str,
}

#[derive(Clone, Debug)]
pub struct Stylizer {
    client: Option<YandexArtClient>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl Stylizer {
    pub fn new(settings: &StylizeSettings) -> Result<Self, YandexArtError> {
        let client = match settings.credentials() {
            Some((api_key, folder_id)) => Some(YandexArtClient::new(
                settings.base_url.clone(),
                api_key,
                folder_id,
            )?),
            None => {
                tracing::warn!("Stylization credentials not configured; uploads stay unprocessed");
                None
            }
        };

        Ok(Self {
            client,
            poll_interval: settings.poll_interval,
            max_poll_attempts: settings.max_poll_attempts,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Stylize one photo and return the public URL of the stylized image.
    ///
    /// On success the record has `styled_url` set and `is_processed = true`.
    /// On failure the record is left untouched.
    pub async fn stylize(
        &self,
        photos: &dyn PhotoStore,
        storage: &dyn Storage,
        target: StylizeTarget<'_>,
    ) -> Result<String, StylizeError> {
        let client = self
            .client
            .as_ref()
            .ok_or(StylizeError::MissingCredentials)?;

        let request = GenerationRequest::stylize(
            client.folder_id(),
            target.prompt,
            target.original_url,
            random_seed(),
        );
        let operation_id = client.submit(&request).await?;

        let encoded = client
            .wait_for_image(&operation_id, self.poll_interval, self.max_poll_attempts)
            .await?;
        let data = STANDARD.decode(encoded.trim())?;

        let styled_url = storage
            .upload_with_key(target.styled_key, data, STYLED_CONTENT_TYPE)
            .await?;
        photos.mark_styled(target.photo_id, &styled_url).await?;

        tracing::info!(
            photo_id = target.photo_id,
            operation_id = %operation_id,
            styled_url = %styled_url,
            "Photo stylized"
        );

        Ok(styled_url)
    }
}
