//! devops-info-service: a small JSON-over-HTTP service that reports service
//! metadata, host facts, process uptime and per-request diagnostics, plus a
//! liveness endpoint.

pub mod config;
pub mod http;
pub mod info;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod uptime;

pub use routes::create_router;
pub use state::AppState;
pub use uptime::Uptime;
