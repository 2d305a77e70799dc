//! The delivery service call contract.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tokio::time::Instant;

use crate::DeliveryError;

/// A raw MIME message addressed to exactly one recipient.
///
/// The body is reference counted, so building one message per recipient from
/// the same buffered content does not copy it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    recipient: String,
    body: Bytes,
}

impl Message {
    /// Build a message from an already encoded MIME body.
    pub fn mime(body: Bytes, recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            body,
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (String, Bytes) {
        (self.recipient, self.body)
    }
}

/// What the delivery service reports for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    /// Service-assigned message id
    pub id: String,
    /// Human readable description, e.g. "Queued. Thank you."
    pub message: String,
}

/// A transactional email service able to accept one message at a time.
///
/// Implementations must give up once `deadline` has passed and report
/// [`DeliveryError::Timeout`]. Callers may additionally enforce the deadline
/// themselves.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message, deadline: Instant)
    -> Result<SendResponse, DeliveryError>;
}
