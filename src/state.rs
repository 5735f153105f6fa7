//! Shared application state for request handlers.

use crate::uptime::Uptime;

/// Shared application state, cloned into every handler.
///
/// Holds only the process start marker, which is immutable after startup,
/// so no synchronization is needed.
#[derive(Clone, Debug)]
pub struct AppState {
    pub uptime: Uptime,
}

impl AppState {
    /// Creates application state around an already captured start marker.
    pub fn new(uptime: Uptime) -> Self {
        Self { uptime }
    }
}
