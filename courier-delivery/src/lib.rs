//! Delivery service client for the courier relay.
//!
//! [`Mailer`] is the seam between relay sessions and the transactional email
//! service: one call per recipient, bounded by a deadline. [`MailgunClient`]
//! is the production implementation.

mod error;
mod mailer;
mod mailgun;

pub use error::DeliveryError;
pub use mailer::{Mailer, Message, SendResponse};
pub use mailgun::{DEFAULT_API_BASE, MailgunClient};
