//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Bind the listener described by `config`.
pub async fn bind(config: &HttpServerConfig) -> Result<TcpListener, ServerError> {
    let addr = config.bind_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on an already bound listener until a shutdown signal arrives.
///
/// Handlers can extract the transport peer address via `ConnectInfo<SocketAddr>`.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    serve_with_shutdown(listener, app, shutdown::shutdown_signal()).await
}

/// Serve `app` until `signal` resolves.
///
/// Once `signal` completes the listener stops accepting connections and
/// in-flight requests are allowed to finish before this returns.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Starting HTTP server");
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(signal)
    .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use axum::routing::get;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn bind_reports_address_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let config = HttpServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
        };
        let err = bind(&config).await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { addr, .. } if addr.port() == port));
        assert!(err.to_string().contains(&port.to_string()));
    }

    #[tokio::test]
    async fn bind_uses_configured_port() {
        let config = HttpServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };
        let listener = bind(&config).await.unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
    }

    #[tokio::test]
    async fn shutdown_signal_stops_server_after_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/", get(|| async { "ok" }));

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_with_shutdown(listener, app, async move {
            let _ = rx.await;
        }));

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap();
        let response = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server should stop after the shutdown signal")
            .unwrap();
        assert!(result.is_ok());

        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn in_flight_request_completes_during_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let started_tx = std::sync::Arc::new(std::sync::Mutex::new(Some(started_tx)));
        let app = Router::new().route(
            "/slow",
            get(move || {
                let started_tx = started_tx.clone();
                async move {
                    let started = started_tx.lock().unwrap().take();
                    if let Some(tx) = started {
                        let _ = tx.send(());
                    }
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }
            }),
        );

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_with_shutdown(listener, app, async move {
            let _ = rx.await;
        }));

        let request = tokio::spawn(async move {
            reqwest::Client::new()
                .get(format!("http://{}/slow", addr))
                .send()
                .await
                .unwrap()
                .text()
                .await
                .unwrap()
        });

        started_rx.await.unwrap();
        tx.send(()).unwrap();

        assert_eq!(request.await.unwrap(), "done");
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server should stop once the request has drained")
            .unwrap();
        assert!(result.is_ok());
    }
}
