//! Error types for metrics operations

use thiserror::Error;

/// Errors that can occur during metrics operations
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The counter family is already present in the target registry
    #[error("Metric {0} is already registered")]
    AlreadyRegistered(String),

    /// Any other error reported by the prometheus client
    #[error("Prometheus error: {0}")]
    Prometheus(prometheus::Error),

    /// Failed to bind the exporter to the specified address
    #[error("Failed to bind metrics server to {address}: {source}")]
    BindError {
        address: String,
        source: std::io::Error,
    },

    /// Metrics server encountered a runtime error
    #[error("Metrics server error: {0}")]
    ServerError(#[source] std::io::Error),
}

impl From<prometheus::Error> for MetricsError {
    fn from(err: prometheus::Error) -> Self {
        match err {
            prometheus::Error::AlreadyReg => Self::AlreadyRegistered(crate::MESSAGES_METRIC.into()),
            other => Self::Prometheus(other),
        }
    }
}
