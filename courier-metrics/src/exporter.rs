//! Pull-based metrics exporter

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::net::TcpListener;

use crate::MetricsError;

/// Path the exposition is served on
pub const METRICS_PATH: &str = "/metrics";

/// Metrics exposition HTTP server
///
/// Serves the current snapshot of a [`Registry`] at [`METRICS_PATH`] in the
/// Prometheus text format.
pub struct MetricsServer {
    listener: TcpListener,
    router: Router,
}

impl MetricsServer {
    /// Bind a new metrics server
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the specified address fails.
    pub async fn bind(address: &str, registry: Registry) -> Result<Self, MetricsError> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| MetricsError::BindError {
                address: address.to_string(),
                source: e,
            })?;

        tracing::info!(address = %address, "Metrics server bound successfully");

        Ok(Self {
            listener,
            router: router(registry),
        })
    }

    /// Address the server is listening on
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, MetricsError> {
        self.listener.local_addr().map_err(MetricsError::ServerError)
    }

    /// Serve scrapes until the server fails
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a runtime error.
    pub async fn serve(self) -> Result<(), MetricsError> {
        tracing::info!("Metrics server starting");

        axum::serve(self.listener, self.router)
            .await
            .map_err(MetricsError::ServerError)
    }
}

fn router(registry: Registry) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_handler))
        .with_state(registry)
}

async fn metrics_handler(State(registry): State<Registry>) -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
