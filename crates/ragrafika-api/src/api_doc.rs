//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use ragrafika_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ragrafika Portfolio API",
        version = "0.1.0",
        description = "Portfolio photo management. Uploaded photos are stored as-is and restyled through an image generation service when credentials are configured."
    ),
    paths(
        handlers::portfolio::list_photos,
        handlers::portfolio::create_photo,
        handlers::portfolio::delete_photo,
    ),
    components(schemas(
        models::PhotoRecord,
        models::PhotoListResponse,
        models::CreatePhotoRequest,
        models::CreatePhotoResponse,
        models::DeletePhotoResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "portfolio", description = "Portfolio photos")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
