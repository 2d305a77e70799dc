//! Mailgun HTTP API client.
//!
//! Messages are submitted pre-encoded through the `messages.mime` endpoint so
//! the relayed content reaches Mailgun exactly as it was received over SMTP.

use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tokio::time::Instant;

use crate::{DeliveryError, Mailer, Message, SendResponse};

/// Default API base (US region)
pub const DEFAULT_API_BASE: &str = "https://api.mailgun.net";

/// A Mailgun client bound to one sending domain.
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct MailgunClient {
    http: Client,
    endpoint: String,
    private_key: String,
}

impl std::fmt::Debug for MailgunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    message: String,
}

impl MailgunClient {
    /// Create a client for `domain` authenticated with `private_key`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the HTTP client cannot be
    /// initialised (e.g. the TLS backend fails to load).
    pub fn new(
        domain: &str,
        private_key: impl Into<String>,
        api_base: &str,
    ) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .user_agent(concat!("courier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeliveryError::Transport)?;

        Ok(Self {
            http,
            endpoint: format!("{}/v3/{domain}/messages.mime", api_base.trim_end_matches('/')),
            private_key: private_key.into(),
        })
    }

    /// The URL messages are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for MailgunClient {
    async fn send(
        &self,
        message: Message,
        deadline: Instant,
    ) -> Result<SendResponse, DeliveryError> {
        let budget = deadline.saturating_duration_since(Instant::now());
        if budget.is_zero() {
            return Err(DeliveryError::Timeout(budget));
        }

        let (recipient, body) = message.into_parts();
        tracing::trace!(endpoint = %self.endpoint, %recipient, size = body.len(), "Posting message");

        let length = body.len() as u64;
        let part = Part::stream_with_length(body, length)
            .file_name("message.mime")
            .mime_str("message/rfc822")
            .map_err(DeliveryError::Transport)?;
        let form = Form::new().text("to", recipient).part("message", part);

        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth("api", Some(&self.private_key))
            .multipart(form)
            .timeout(budget)
            .send()
            .await
            .map_err(|e| classify(e, budget))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            let message = serde_json::from_str::<ErrorReply>(&text)
                .map(|reply| reply.message)
                .unwrap_or(text);

            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SendResponse>()
            .await
            .map_err(|e| match classify(e, budget) {
                DeliveryError::Transport(e) => DeliveryError::InvalidResponse(e.to_string()),
                other => other,
            })
    }
}

fn classify(err: reqwest::Error, budget: std::time::Duration) -> DeliveryError {
    if err.is_timeout() {
        DeliveryError::Timeout(budget)
    } else {
        DeliveryError::Transport(err)
    }
}
