//! Service information handler.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    response::Response,
    Extension,
};
use chrono::Utc;
use http::StatusCode;
use tracing::instrument;

use crate::info::{MainResponse, RequestInfo, RuntimeInfo, ServiceInfo, SystemInfo, ENDPOINTS};
use crate::middleware::RequestId;
use crate::routes::write_json;
use crate::state::AppState;

/// Service information handler.
///
/// Registered for every method on `/` and as the router fallback, so the
/// request block echoes whatever method and path were received.
#[instrument(name = "home::index", skip_all, fields(request_id = %request_id.0))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    request: Request,
) -> Response {
    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "Serving service information"
    );

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    let response = MainResponse {
        service: ServiceInfo::current(),
        system: SystemInfo::collect(),
        runtime: RuntimeInfo::collect(&state.uptime, Utc::now()),
        request: RequestInfo::collect(
            request.method(),
            request.uri().path(),
            request.headers(),
            peer.as_deref(),
        ),
        endpoints: ENDPOINTS.to_vec(),
    };

    write_json(StatusCode::OK, &response)
}
