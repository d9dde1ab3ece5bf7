//! Yandex ART image generation client
//!
//! Generation is asynchronous: `submit` starts a job and returns an operation id,
//! `get_operation` reports progress, `wait_for_image` polls until the operation
//! completes or the attempt budget runs out.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use tokio::time::sleep;

const SUBMIT_TIMEOUT_SECS: u64 = 30;
const POLL_TIMEOUT_SECS: u64 = 10;
const MODEL_PATH: &str = "yandex-art/latest";
const ORIGINAL_IMAGE_WEIGHT: &str = "0.7";

#[derive(Debug, thiserror::Error)]
pub enum YandexArtError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Request to generation API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generation finished without an image")]
    MissingImage,

    #[error("Generation did not finish after {attempts} checks")]
    Timeout { attempts: u32 },
}

/// Request body of `imageGenerationAsync`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub model_uri: String,
    pub generation_options: GenerationOptions,
    pub messages: Vec<GenerationMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub seed: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectRatio {
    pub width_ratio: String,
    pub height_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationMessage {
    pub weight: String,
    pub text: String,
}

impl GenerationRequest {
    /// 16:9 request: the style prompt at full weight, the original image URL at 0.7
    pub fn stylize(folder_id: &str, prompt: &str, original_url: &str, seed: String) -> Self {
        GenerationRequest {
            model_uri: format!("art://{}/{}", folder_id, MODEL_PATH),
            generation_options: GenerationOptions {
                seed,
                aspect_ratio: AspectRatio {
                    width_ratio: "16".to_string(),
                    height_ratio: "9".to_string(),
                },
            },
            messages: vec![
                GenerationMessage {
                    weight: "1".to_string(),
                    text: prompt.to_string(),
                },
                GenerationMessage {
                    weight: ORIGINAL_IMAGE_WEIGHT.to_string(),
                    text: original_url.to_string(),
                },
            ],
        }
    }
}

/// Random generation seed of at most ten decimal digits
pub fn random_seed() -> String {
    rand::rng().random_range(0..10_000_000_000u64).to_string()
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

/// Long-running operation as reported by `/operations/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OperationResponse {
    /// Base64 encoded image
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Operation {
    /// The encoded image once the operation is done
    pub fn image(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.image.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Yandex ART API client
#[derive(Clone)]
pub struct YandexArtClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    folder_id: String,
}

impl Debug for YandexArtClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("YandexArtClient")
            .field("base_url", &self.base_url)
            .field("folder_id", &self.folder_id)
            .finish()
    }
}

impl YandexArtClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Result<Self, YandexArtError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SUBMIT_TIMEOUT_SECS))
            .build()
            .map_err(|e| YandexArtError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            folder_id: folder_id.into(),
        })
    }

    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    fn auth_header(&self) -> String {
        format!("Api-Key {}", self.api_key)
    }

    async fn error_from(response: reqwest::Response) -> YandexArtError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        YandexArtError::Api { status, body }
    }

    /// Start a generation job and return its operation id
    pub async fn submit(&self, request: &GenerationRequest) -> Result<String, YandexArtError> {
        let url = format!("{}/foundationModels/v1/imageGenerationAsync", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .timeout(Duration::from_secs(SUBMIT_TIMEOUT_SECS))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let submitted: SubmitResponse = response.json().await?;

        tracing::info!(operation_id = %submitted.id, "Image generation submitted");

        Ok(submitted.id)
    }

    /// Fetch the current state of an operation
    pub async fn get_operation(&self, operation_id: &str) -> Result<Operation, YandexArtError> {
        let url = format!("{}/operations/{}", self.base_url, operation_id);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Poll an operation until it is done, sleeping `interval` before each check.
    ///
    /// Performs at most `max_attempts` checks. Returns the base64 image.
    pub async fn wait_for_image(
        &self,
        operation_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<String, YandexArtError> {
        for attempt in 0..max_attempts {
            sleep(interval).await;

            let operation = self.get_operation(operation_id).await?;

            if !operation.done {
                tracing::debug!(
                    operation_id = %operation_id,
                    attempt = attempt + 1,
                    max_attempts,
                    "Image generation in progress"
                );
                continue;
            }

            if let Some(ref error) = operation.error {
                return Err(YandexArtError::Failed(
                    error
                        .message
                        .clone()
                        .unwrap_or_else(|| "Unknown error".to_string()),
                ));
            }

            let image = operation
                .image()
                .map(str::to_string)
                .ok_or(YandexArtError::MissingImage)?;

            tracing::info!(
                operation_id = %operation_id,
                attempts = attempt + 1,
                "Image generation completed"
            );

            return Ok(image);
        }

        Err(YandexArtError::Timeout {
            attempts: max_attempts,
        })
    }
}
