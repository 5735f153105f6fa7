//! Process uptime tracking.

use std::time::Instant;

use crate::config::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Process start marker, captured once in `main` and never mutated.
///
/// Elapsed time is measured against the monotonic clock, so uptime never
/// decreases across requests.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    started_at: Instant,
}

impl Uptime {
    /// Capture the start marker now.
    pub fn start() -> Self {
        Self::since(Instant::now())
    }

    /// Use an existing instant as the start marker.
    pub fn since(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// Whole seconds elapsed since start.
    pub fn seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Render elapsed seconds as `"<hours> hours, <minutes> minutes"`.
///
/// Hours are unbounded (no day rollover) and units are never singularized.
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{} hours, {} minutes", hours, minutes)
}
