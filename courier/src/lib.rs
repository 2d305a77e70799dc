//! An SMTP to Mailgun relay.
//!
//! An SMTP protocol engine drives a [`RelayBackend`] through the [`Backend`]
//! and [`Session`] traits. Every accepted message is posted to Mailgun once
//! per recipient, and each attempt is counted as `success` or `fail` in the
//! `mailgun_messages` metric.
//!
//! ```rust,no_run
//! use courier::{Backend, RelayBackend, RelayConfig, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let backend = RelayBackend::new(RelayConfig::new("mg.example.com", "key-123")?)?;
//!
//! let mut session = backend.anonymous_login()?;
//! let mut body: &[u8] = b"Subject: Hello\r\n\r\nHi there\r\n";
//! session
//!     .send("me@example.com", &["you@example.com".to_string()], &mut body)
//!     .await?;
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod relay;
pub mod session;

pub use backend::{Backend, Session};
pub use config::RelayConfig;
pub use controller::Courier;
pub use error::{RelayError, SubmitError};
pub use relay::RelayBackend;
pub use session::{RelaySession, SessionState};
pub use tracing;
