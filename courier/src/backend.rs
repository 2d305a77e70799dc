//! Callback contract between an SMTP protocol engine and a mail backend.
//!
//! The engine owns connections, command parsing and TLS. It calls into a
//! [`Backend`] once per login to obtain a [`Session`], hands each accepted
//! message to [`Session::send`], and calls [`Session::logout`] when the SMTP
//! session ends.

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Produces a session for every login on the protocol engine.
pub trait Backend: Send + Sync {
    type Session: Session;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called after the client authenticated with `username`/`password`.
    ///
    /// # Errors
    ///
    /// Implementation defined; the engine rejects the login.
    fn login(&self, username: &str, password: &str) -> Result<Self::Session, Self::Error>;

    /// Called when a client submits mail without authenticating.
    ///
    /// # Errors
    ///
    /// Implementation defined; the engine rejects the session.
    fn anonymous_login(&self) -> Result<Self::Session, Self::Error>;
}

/// One SMTP session, from login until the client goes away.
#[async_trait]
pub trait Session: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Accept one message from `from` for every address in `to`.
    ///
    /// The body is the raw message as received after `DATA`.
    ///
    /// # Errors
    ///
    /// Any error is reported to the client as a rejection of the whole message.
    async fn send(
        &mut self,
        from: &str,
        to: &[String],
        body: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<(), Self::Error>;

    /// Called once all operations within the session are complete.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    async fn logout(&mut self) -> Result<(), Self::Error>;
}
