//! HTTP server module.
//!
//! The server includes:
//! - Peer address capture for client IP reporting
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Bind failures surfaced as errors instead of being swallowed

mod server;
mod shutdown;

pub use server::{bind, serve, serve_with_shutdown, start_server, ServerError};
