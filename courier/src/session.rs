//! Relay session: fans one submitted message out to the delivery service.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use courier_delivery::{DeliveryError, Mailer, Message};
use courier_metrics::{Outcome, OutcomeCounters};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    time::Instant,
};

use crate::{SubmitError, backend::Session};

/// Lifecycle of a relay session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// A session bound to one delivery client and the shared outcome counters.
#[derive(Debug)]
pub struct RelaySession<M> {
    mailer: M,
    counters: OutcomeCounters,
    timeout: Duration,
    state: SessionState,
}

impl<M: Mailer> RelaySession<M> {
    pub(crate) const fn new(mailer: M, counters: OutcomeCounters, timeout: Duration) -> Self {
        Self {
            mailer,
            counters,
            timeout,
            state: SessionState::Active,
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Deliver `body` to a single recipient within the session timeout.
    async fn deliver(&self, body: Bytes, recipient: &str) -> Result<(), DeliveryError> {
        let deadline = Instant::now() + self.timeout;
        let message = Message::mime(body, recipient);

        let result = tokio::time::timeout_at(deadline, self.mailer.send(message, deadline))
            .await
            .unwrap_or(Err(DeliveryError::Timeout(self.timeout)));

        match result {
            Ok(response) => {
                self.counters.record(Outcome::Success);
                tracing::info!(
                    recipient,
                    id = %response.id,
                    response = %response.message,
                    "Message relayed"
                );
                Ok(())
            }
            Err(e) => {
                self.counters.record(Outcome::Fail);
                tracing::warn!(recipient, error = %e, "Message relay failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<M: Mailer> Session for RelaySession<M> {
    type Error = SubmitError;

    async fn send(
        &mut self,
        from: &str,
        to: &[String],
        body: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<(), SubmitError> {
        // The stream can only be read once, every recipient gets a view of
        // the same buffer.
        let mut buffer = Vec::new();
        body.read_to_end(&mut buffer).await?;
        let body = Bytes::from(buffer);

        tracing::debug!(
            from,
            recipients = to.len(),
            size = body.len(),
            "Relaying message"
        );

        for recipient in to {
            self.deliver(body.clone(), recipient).await?;
        }

        Ok(())
    }

    async fn logout(&mut self) -> Result<(), SubmitError> {
        self.state = SessionState::Terminated;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use courier_delivery::SendResponse;
    use courier_metrics::Registry;

    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Accepting;

    #[async_trait]
    impl Mailer for Accepting {
        async fn send(
            &self,
            message: Message,
            _deadline: Instant,
        ) -> Result<SendResponse, DeliveryError> {
            Ok(SendResponse {
                id: format!("<{}>", message.recipient()),
                message: "Queued. Thank you.".to_string(),
            })
        }
    }

    fn session() -> (RelaySession<Accepting>, OutcomeCounters) {
        let counters = OutcomeCounters::register(&Registry::new()).unwrap();
        (
            RelaySession::new(Accepting, counters.clone(), Duration::from_secs(10)),
            counters,
        )
    }

    #[tokio::test]
    async fn test_logout_terminates() {
        let (mut session, _) = session();
        assert_eq!(session.state(), SessionState::Active);

        session.logout().await.unwrap();
        assert_eq!(session.state(), SessionState::Terminated);

        // Logging out twice is harmless
        session.logout().await.unwrap();
        assert_eq!(session.state(), SessionState::Terminated);
    }

    #[tokio::test]
    async fn test_many_messages_per_session() {
        let (mut session, counters) = session();
        let to = vec!["a@example.com".to_string()];

        for _ in 0..3 {
            let mut body: &[u8] = b"Subject: hi\r\n\r\nbody\r\n";
            session.send("s@example.com", &to, &mut body).await.unwrap();
        }

        assert_eq!(counters.get(Outcome::Success), 3);
        assert_eq!(counters.get(Outcome::Fail), 0);
    }
}
