//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK when the process is running.
//! Used by Kubernetes, ECS, systemd, and load balancers to verify the service is alive.

use axum::{extract::State, response::Response, Extension};
use chrono::Utc;
use http::StatusCode;
use tracing::instrument;

use crate::info::HealthResponse;
use crate::middleware::RequestId;
use crate::routes::write_json;
use crate::state::AppState;

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
#[instrument(name = "health::health", skip_all, fields(request_id = %request_id.0))]
pub async fn health(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    tracing::debug!("Health check");
    let payload = HealthResponse::collect(&state.uptime, Utc::now());
    write_json(StatusCode::OK, &payload)
}
