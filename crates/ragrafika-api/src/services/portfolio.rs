//! Portfolio photo workflows: list, upload + stylize, delete.
//!
//! Store and database failures propagate to the caller. Only stylization is
//! contained: it degrades the result to "unprocessed" and is logged.

use crate::error::HttpAppError;
use crate::services::stylization::StylizeTarget;
use crate::state::AppState;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ragrafika_core::models::{CreatePhotoRequest, CreatePhotoResponse, NewPhoto, PhotoRecord};
use ragrafika_core::AppError;
use ragrafika_storage::PhotoKeys;

const ORIGINAL_CONTENT_TYPE: &str = "image/jpeg";

/// Decode a base64 image payload. Accepts a `data:*;base64,` prefix and embedded whitespace.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    let data = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AppError::InvalidInput(format!("Image is not valid base64: {}", e)))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Image required".to_string()));
    }

    Ok(data)
}

pub async fn list_photos(
    state: &AppState,
    category: Option<&str>,
) -> Result<Vec<PhotoRecord>, HttpAppError> {
    Ok(state.photos.list(category).await?)
}

/// Store the original, record it, then attempt stylization.
pub async fn create_photo(
    state: &AppState,
    request: CreatePhotoRequest,
) -> Result<CreatePhotoResponse, HttpAppError> {
    let encoded = request
        .image()
        .ok_or_else(|| AppError::BadRequest("Image required".to_string()))?;
    let data = decode_image(encoded)?;

    let category = request.category().to_string();
    let keys = PhotoKeys::generate(&category);

    let original_url = state
        .storage
        .upload_with_key(&keys.original, data, ORIGINAL_CONTENT_TYPE)
        .await?;

    let record = state
        .photos
        .insert(NewPhoto {
            category,
            original_url: original_url.clone(),
            title: request.title.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
        })
        .await?;

    tracing::info!(
        photo_id = record.id,
        category = %record.category,
        original_url = %original_url,
        "Portfolio photo stored"
    );

    let target = StylizeTarget {
        photo_id: record.id,
        original_url: &original_url,
        styled_key: &keys.styled,
        prompt: request.style_prompt(),
    };

    let styled_url = match state
        .stylizer
        .stylize(state.photos.as_ref(), state.storage.as_ref(), target)
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(
                photo_id = record.id,
                reason = e.reason(),
                error = %e,
                "Stylization failed; photo left unprocessed"
            );
            None
        }
    };

    Ok(CreatePhotoResponse {
        id: record.id,
        original_url,
        is_processed: styled_url.is_some(),
        styled_url,
    })
}

/// Parse the `id` query value. Missing or empty is a client error.
pub fn parse_photo_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Photo ID required".to_string()))?;

    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid photo ID: {}", raw)))
}

pub async fn delete_photo(state: &AppState, id: i64) -> Result<(), HttpAppError> {
    state.photos.delete(id).await?;
    tracing::info!(photo_id = id, "Portfolio photo deleted");
    Ok(())
}
