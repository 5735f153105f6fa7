//! devops-info-service entry point.
//!
//! Captures the process start time, initializes tracing, resolves the listener
//! configuration from the environment, builds the Axum router and serves it
//! until a shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use devops_info_service::config::{
    AppConfig, LogFormat, DEFAULT_LOG_FILTER, SERVICE_NAME, SERVICE_VERSION,
};
use devops_info_service::http::start_server;
use devops_info_service::{create_router, AppState, Uptime};

/// devops-info-service: service, host and request diagnostics over HTTP
#[derive(Parser, Debug)]
#[command(name = "devops-info-service", version, about)]
struct Args {
    /// Log level filter (e.g., "devops_info_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format: "text" or "json" (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Captured before anything else so uptime covers the whole process
    let uptime = Uptime::start();

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(format) = args.log_format {
        config.logging.format = format;
        config.logging.rejected_format = None;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(EnvFilter::new(&log_filter));
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    if let Some(rejected) = &config.logging.rejected_format {
        tracing::warn!(value = %rejected, "Unrecognized LOG_FORMAT, using text");
    }

    tracing::info!(
        service = SERVICE_NAME,
        version = SERVICE_VERSION,
        addr = %config.http.bind_addr(),
        "Loaded configuration"
    );

    let app = create_router(AppState::new(uptime));

    if let Err(e) = start_server(app, &config.http).await {
        tracing::error!(error = %e, "HTTP server failed");
        return Err(e.into());
    }

    Ok(())
}
