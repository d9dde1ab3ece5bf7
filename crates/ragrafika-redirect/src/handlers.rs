//! The single catch-all handler.

use crate::page::{build_target_url, render_html};
use crate::RedirectConfig;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const PREFLIGHT_MAX_AGE: &str = "86400";
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
        ],
    )
        .into_response()
}

/// Any method, any path. OPTIONS gets the CORS preflight, everything else the redirect page.
#[tracing::instrument(skip_all, fields(operation = "redirect", method = %method, path = %uri.path()))]
pub async fn redirect(
    State(config): State<Arc<RedirectConfig>>,
    method: Method,
    uri: Uri,
    query: Result<Query<BTreeMap<String, String>>, QueryRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }

    let params = match query {
        Ok(Query(params)) => params,
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable query string dropped");
            BTreeMap::new()
        }
    };

    let target = build_target_url(config.canonical_host(), uri.path(), &params);
    tracing::debug!(target = %target, "Redirecting");

    let mut response = render_html(&target, config.canonical_host()).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
