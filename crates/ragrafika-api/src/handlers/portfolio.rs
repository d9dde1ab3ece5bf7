//! Portfolio endpoint handlers. One path, dispatched by method.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::portfolio;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use ragrafika_core::models::{
    CreatePhotoRequest, CreatePhotoResponse, DeletePhotoQuery, DeletePhotoResponse,
    ListPhotosQuery, PhotoListResponse,
};
use ragrafika_core::AppError;
use std::sync::Arc;

pub const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, X-Auth-Token";
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// CORS preflight: empty body. `Access-Control-Allow-Origin` is added by middleware.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
        ],
    )
}

#[utoipa::path(
    get,
    path = "/portfolio",
    tag = "portfolio",
    params(ListPhotosQuery),
    responses(
        (status = 200, description = "Photos, newest first", body = PhotoListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_photos"))]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPhotosQuery>,
) -> Result<Json<PhotoListResponse>, HttpAppError> {
    let photos = portfolio::list_photos(&state, query.category_filter()).await?;
    Ok(Json(PhotoListResponse { photos }))
}

#[utoipa::path(
    post,
    path = "/portfolio",
    tag = "portfolio",
    request_body = CreatePhotoRequest,
    responses(
        (status = 200, description = "Photo stored; styled_url is null when stylization failed", body = CreatePhotoResponse),
        (status = 400, description = "Image missing or not valid base64", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_photo"))]
pub async fn create_photo(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreatePhotoRequest>,
) -> Result<Json<CreatePhotoResponse>, HttpAppError> {
    let response = portfolio::create_photo(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/portfolio",
    tag = "portfolio",
    params(DeletePhotoQuery),
    responses(
        (status = 200, description = "Deleted (also when the id did not exist)", body = DeletePhotoResponse),
        (status = 400, description = "Photo ID missing or not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_photo"))]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeletePhotoQuery>,
) -> Result<Json<DeletePhotoResponse>, HttpAppError> {
    let id = portfolio::parse_photo_id(query.id.as_deref())?;
    portfolio::delete_photo(&state, id).await?;
    Ok(Json(DeletePhotoResponse { success: true }))
}

/// Any other method
pub async fn method_not_allowed() -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed)
}
