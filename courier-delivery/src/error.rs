//! Typed error handling for delivery service calls.
//!
//! Every variant is terminal for the message being relayed: nothing at this
//! layer retries.

use std::time::Duration;

use thiserror::Error;

/// Error returned by a single delivery service call.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The call did not complete within its deadline.
    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with an application-level error (invalid
    /// recipient, quota, bad credentials, ...).
    #[error("Delivery rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request could not be carried out (connection refused, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service accepted the request but its reply could not be understood.
    #[error("Invalid response from delivery service: {0}")]
    InvalidResponse(String),
}

impl DeliveryError {
    /// Returns `true` if the call exceeded its deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns `true` if the service explicitly refused the message.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// HTTP status reported by the service, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
