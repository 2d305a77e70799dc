//! Error types for the relay.

use std::io;

use courier_delivery::DeliveryError;
use courier_metrics::MetricsError;
use thiserror::Error;

/// Errors raised while constructing the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A configuration value is missing or empty.
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// The outcome counters could not be registered.
    #[error("Metrics registration failed: {0}")]
    Metrics(#[from] MetricsError),

    /// The delivery client could not be created.
    #[error("Delivery client initialisation failed: {0}")]
    Client(#[from] DeliveryError),
}

/// Errors returned from a message submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The first recipient delivery that failed, exactly as the delivery
    /// service client reported it.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// The message body could not be read from the protocol engine.
    #[error("Failed to read message body: {0}")]
    Body(#[from] io::Error),
}

impl SubmitError {
    /// The delivery failure, if this error came from the delivery service.
    #[must_use]
    pub const fn delivery(&self) -> Option<&DeliveryError> {
        match self {
            Self::Delivery(e) => Some(e),
            Self::Body(_) => None,
        }
    }

    /// Returns `true` if a recipient delivery exceeded its deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Delivery(e) if e.is_timeout())
    }
}
