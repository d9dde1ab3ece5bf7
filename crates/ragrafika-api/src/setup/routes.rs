//! Route configuration and setup

use crate::handlers::{health, portfolio};
use crate::middleware::{allow_any_origin_middleware, request_id_middleware};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, MethodRouter},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on in-flight requests
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// The portfolio endpoint: GET lists, POST uploads, DELETE removes, OPTIONS answers
/// preflight, anything else is 405.
fn portfolio_routes() -> MethodRouter<Arc<AppState>> {
    get(portfolio::list_photos)
        .post(portfolio::create_photo)
        .delete(portfolio::delete_photo)
        .options(portfolio::preflight)
        .fallback(portfolio::method_not_allowed)
}

/// Setup all application routes
///
/// The portfolio endpoint is served both at `/` and at `/portfolio`.
pub fn setup_routes(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", portfolio_routes())
        .route("/portfolio", portfolio_routes())
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(allow_any_origin_middleware))
}
