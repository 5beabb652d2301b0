mod common;
mod records;

pub use common::common_routes;
pub use records::{catalog_routes, record_routes};

use crate::response::error_body;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

async fn no_route(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", format!("no route for {}", uri.path()), None)),
    )
}

/// The body limit layer refuses oversized requests with a plain-text 413; give it the envelope.
async fn envelope_payload_too_large(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json {
        return response;
    }
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(error_body(
            "payload_too_large",
            "request body exceeds the configured limit".into(),
            None,
        )),
    )
        .into_response()
}

/// Full application: all routes, the 404 envelope, request tracing and the body limit.
pub fn router(state: AppState) -> Router {
    let max_body = state.settings.max_body_bytes;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(catalog_routes(state.clone()))
        .merge(record_routes(state))
        .fallback(no_route)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(middleware::map_response(envelope_payload_too_large))
        .layer(TraceLayer::new_for_http())
}
