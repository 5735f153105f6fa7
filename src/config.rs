//! Configuration resolution and constants.
//!
//! The service is configured almost entirely by constants. The only runtime
//! settings are the listener port (`PORT`) and the log output format
//! (`LOG_FORMAT`), both read from the environment. `AppConfig` is the root
//! configuration struct.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported in the `service` block
pub const SERVICE_NAME: &str = "devops-info-service";

/// Service version, taken from the crate manifest
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Free-text description reported in the `service` block
pub const SERVICE_DESCRIPTION: &str = "DevOps course info service";

/// Framework label reported in the `service` block
pub const SERVICE_FRAMEWORK: &str = "Rust axum";

// =============================================================================
// Response Constants
// =============================================================================

/// Substituted when the hostname cannot be resolved
pub const UNKNOWN_HOSTNAME: &str = "unknown";

/// OS version is not probed; this placeholder is always reported
pub const PLATFORM_VERSION_PLACEHOLDER: &str = "unknown";

/// Reported when the transport peer address is unavailable
pub const UNKNOWN_CLIENT_IP: &str = "unknown";

/// Timezone label for every timestamp the service emits
pub const TIMEZONE_LABEL: &str = "UTC";

/// Literal status reported by the liveness endpoint
pub const HEALTH_STATUS: &str = "healthy";

/// Every response carries per-request data and must not be cached upstream
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header echoing the generated request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// Time unit constants (in seconds) for uptime rendering
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;
/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3600;

// =============================================================================
// Defaults
// =============================================================================

/// Listener port when `PORT` is unset or empty
pub const DEFAULT_PORT: u16 = 8080;

/// Listener address; the service binds every interface
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "devops_info_service=info,tower_http=info";

/// Environment variable holding the listener port
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl HttpServerConfig {
    /// Socket address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Unrecognized `LOG_FORMAT` value that was replaced by the default,
    /// kept so it can be reported once logging is up
    pub rejected_format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            rejected_format: None,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty values both fall back to the defaults. An invalid port
    /// is an error; an unrecognized log format falls back to text.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match non_empty(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let logging = match non_empty(LOG_FORMAT_ENV) {
            Some(raw) => match raw.parse() {
                Ok(format) => LoggingConfig {
                    format,
                    rejected_format: None,
                },
                Err(_) => LoggingConfig {
                    rejected_format: Some(raw),
                    ..LoggingConfig::default()
                },
            },
            None => LoggingConfig::default(),
        };

        Ok(Self {
            http: HttpServerConfig {
                port,
                ..HttpServerConfig::default()
            },
            logging,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0:?} (expected 0-65535)")]
    InvalidPort(String),
    #[error("Invalid log format: {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),
}
