//! Relay configuration

use std::{fmt, time::Duration};

use courier_delivery::DEFAULT_API_BASE;
use serde::Deserialize;

use crate::RelayError;

/// Environment variable overriding [`RelayConfig::domain`]
pub const DOMAIN_ENV: &str = "MAILGUN_DOMAIN";
/// Environment variable overriding [`RelayConfig::private_key`]
pub const PRIVATE_KEY_ENV: &str = "MAILGUN_PRIVATE_KEY";

/// Delivery service settings shared by every relay session
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RelayConfig {
    /// Sending domain registered with Mailgun
    #[serde(default)]
    pub domain: String,

    /// Mailgun private API key
    #[serde(default, alias = "credential")]
    pub private_key: String,

    /// API base URL
    ///
    /// Use `https://api.eu.mailgun.net` for domains in the EU region.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Upper bound, in seconds, on a single recipient delivery
    ///
    /// Between 1 and [`MAX_TIMEOUT_SECS`].
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Longest a single recipient delivery may take, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 10;

const fn default_timeout_secs() -> u64 {
    MAX_TIMEOUT_SECS
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("domain", &self.domain)
            .field("private_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            private_key: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RelayConfig {
    /// Build a validated configuration with default API base and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfiguration`] if either value is empty
    /// or blank.
    pub fn new(domain: impl Into<String>, private_key: impl Into<String>) -> Result<Self, RelayError> {
        let config = Self {
            domain: domain.into(),
            private_key: private_key.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the required values are present.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfiguration`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.domain.trim().is_empty() {
            return Err(RelayError::InvalidConfiguration {
                field: "domain",
                reason: "must not be empty".to_string(),
            });
        }

        if self.private_key.trim().is_empty() {
            return Err(RelayError::InvalidConfiguration {
                field: "private_key",
                reason: "must not be empty".to_string(),
            });
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(RelayError::InvalidConfiguration {
                field: "timeout_secs",
                reason: format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
            });
        }

        Ok(())
    }

    /// Replace file values with those found through `lookup`.
    ///
    /// Only non-empty values override.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(domain) = lookup(DOMAIN_ENV).filter(|v| !v.is_empty()) {
            self.domain = domain;
        }

        if let Some(key) = lookup(PRIVATE_KEY_ENV).filter(|v| !v.is_empty()) {
            self.private_key = key;
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
