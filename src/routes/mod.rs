//! HTTP route handlers.
//!
//! Both routes accept every HTTP method. Any path that is not `/health` is
//! served by the service information handler, so method and path are always
//! echoed back. All responses are marked `Cache-Control: no-store`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Serialize `payload` as a JSON response with the given status.
///
/// The status and content type are fixed before serialization. If encoding
/// fails the error is logged and the body is left empty; the status is not
/// changed.
pub fn write_json<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    let body = match serde_json::to_vec(payload) {
        Ok(mut bytes) => {
            bytes.push(b'\n');
            bytes
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode JSON response");
            Vec::new()
        }
    };

    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// Creates the Axum router with both routes and response headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(home::index))
        .route("/health", any(health::health))
        .fallback(home::index)
        .with_state(state)
        // Per-request diagnostics must never be served from a cache
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
