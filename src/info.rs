//! Response payloads and the snapshots they are built from.
//!
//! Every value here is constructed fresh for a single request. Field names
//! are the wire contract of the JSON responses.

use std::ffi::OsString;
use std::io;

use chrono::{DateTime, SecondsFormat, Utc};
use http::HeaderMap;
use serde::Serialize;

use crate::config::{
    HEALTH_STATUS, PLATFORM_VERSION_PLACEHOLDER, SERVICE_DESCRIPTION, SERVICE_FRAMEWORK,
    SERVICE_NAME, SERVICE_VERSION, TIMEZONE_LABEL, UNKNOWN_CLIENT_IP, UNKNOWN_HOSTNAME,
};
use crate::uptime::{format_uptime, Uptime};

/// Static service metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub framework: &'static str,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            name: SERVICE_NAME,
            version: SERVICE_VERSION,
            description: SERVICE_DESCRIPTION,
            framework: SERVICE_FRAMEWORK,
        }
    }
}

/// Host facts.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: &'static str,
    pub platform_version: &'static str,
    pub architecture: &'static str,
    pub cpu_count: usize,
}

impl SystemInfo {
    /// Collect host facts, resolving the hostname through the OS.
    pub fn collect() -> Self {
        Self::collect_with(hostname::get())
    }

    /// Collect host facts from an already attempted hostname lookup.
    pub fn collect_with(hostname: io::Result<OsString>) -> Self {
        Self {
            hostname: hostname_or_unknown(hostname),
            platform: std::env::consts::OS,
            platform_version: PLATFORM_VERSION_PLACEHOLDER,
            architecture: std::env::consts::ARCH,
            cpu_count: cpu_count(),
        }
    }
}

/// Hostname from a lookup result, or `"unknown"` if the lookup failed.
pub fn hostname_or_unknown(result: io::Result<OsString>) -> String {
    match result {
        Ok(name) if !name.is_empty() => name.to_string_lossy().into_owned(),
        Ok(_) => {
            tracing::debug!("Hostname lookup returned an empty name");
            UNKNOWN_HOSTNAME.to_string()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Hostname lookup failed");
            UNKNOWN_HOSTNAME.to_string()
        }
    }
}

fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Process runtime facts.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub uptime_seconds: u64,
    pub uptime_human: String,
    pub current_time: String,
    pub timezone: &'static str,
}

impl RuntimeInfo {
    pub fn collect(uptime: &Uptime, now: DateTime<Utc>) -> Self {
        let uptime_seconds = uptime.seconds();
        Self {
            uptime_seconds,
            uptime_human: format_uptime(uptime_seconds),
            current_time: format_timestamp(now),
            timezone: TIMEZONE_LABEL,
        }
    }
}

/// RFC3339 with nanosecond precision and a `Z` suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Facts about the inbound request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestInfo {
    pub client_ip: String,
    pub user_agent: String,
    pub method: String,
    pub path: String,
}

impl RequestInfo {
    /// Build from request parts. `peer` is the transport peer address, if known.
    pub fn collect(
        method: &http::Method,
        path: &str,
        headers: &HeaderMap,
        peer: Option<&str>,
    ) -> Self {
        let user_agent = headers
            .get(http::header::USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        Self {
            client_ip: resolve_client_ip(headers, peer),
            user_agent,
            method: method.as_str().to_string(),
            path: path.to_string(),
        }
    }
}

/// Client IP for a request.
///
/// A non-empty `X-Forwarded-For` header is trusted and returned verbatim,
/// multi-hop lists included. Otherwise the host part of the peer address is
/// used, or the raw peer address if it is not a `host:port` pair.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<&str>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|v| !v.is_empty());

    if let Some(forwarded) = forwarded {
        return forwarded;
    }

    match peer {
        Some(addr) => split_host_port(addr).unwrap_or(addr).to_string(),
        None => UNKNOWN_CLIENT_IP.to_string(),
    }
}

/// Split `host:port` or `[host]:port` and return the host.
///
/// Returns `None` when there is no port separator, the brackets are
/// malformed, or an unbracketed host itself contains a colon.
pub fn split_host_port(addr: &str) -> Option<&str> {
    let colon = addr.rfind(':')?;
    let (host, _port) = (&addr[..colon], &addr[colon + 1..]);

    if let Some(inner) = host.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        if inner.contains('[') || inner.contains(']') {
            return None;
        }
        return Some(inner);
    }

    if host.contains(':') || host.contains('[') || host.contains(']') {
        return None;
    }

    Some(host)
}

/// One exposed route.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointDescriptor {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

/// The routes this service exposes.
pub const ENDPOINTS: [EndpointDescriptor; 2] = [
    EndpointDescriptor {
        path: "/",
        method: "GET",
        description: "Service information",
    },
    EndpointDescriptor {
        path: "/health",
        method: "GET",
        description: "Health check",
    },
];

/// Payload for `/`.
#[derive(Debug, Clone, Serialize)]
pub struct MainResponse {
    pub service: ServiceInfo,
    pub system: SystemInfo,
    pub runtime: RuntimeInfo,
    pub request: RequestInfo,
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Payload for `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

impl HealthResponse {
    pub fn collect(uptime: &Uptime, now: DateTime<Utc>) -> Self {
        Self {
            status: HEALTH_STATUS,
            timestamp: format_timestamp(now),
            uptime_seconds: uptime.seconds(),
        }
    }
}
