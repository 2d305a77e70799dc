//! Session factory for the Mailgun relay.

use std::{convert::Infallible, fmt};

use courier_delivery::{MailgunClient, Mailer};
use courier_metrics::{MetricsError, MetricsServer, OutcomeCounters, Registry};

use crate::{RelayConfig, RelayError, backend::Backend, session::RelaySession};

/// Hands out [`RelaySession`]s that share one set of outcome counters.
///
/// Any submitted credentials are accepted: delivery is authorised by the
/// Mailgun private key, not by the SMTP login.
pub struct RelayBackend<M = MailgunClient> {
    config: RelayConfig,
    mailer: M,
    counters: OutcomeCounters,
    registry: Registry,
}

impl<M> fmt::Debug for RelayBackend<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayBackend")
            .field("domain", &self.config.domain)
            .field("api_base", &self.config.api_base)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl RelayBackend<MailgunClient> {
    /// Create a relay registered with the process-wide default registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or if a relay was
    /// already constructed in this process.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        Self::with_registry(config, courier_metrics::default_registry().clone())
    }

    /// Create a relay whose counters live in `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the counters are
    /// already registered in `registry`, or the HTTP client cannot be built.
    pub fn with_registry(config: RelayConfig, registry: Registry) -> Result<Self, RelayError> {
        config.validate()?;
        let mailer = MailgunClient::new(&config.domain, config.private_key.clone(), &config.api_base)?;
        Self::with_mailer(config, mailer, registry)
    }
}

impl<M: Mailer + Clone> RelayBackend<M> {
    /// Create a relay that delivers through `mailer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the counters are
    /// already registered in `registry`.
    pub fn with_mailer(config: RelayConfig, mailer: M, registry: Registry) -> Result<Self, RelayError> {
        config.validate()?;
        let counters = OutcomeCounters::register(&registry)?;

        tracing::debug!(domain = %config.domain, "Relay backend created");

        Ok(Self {
            config,
            mailer,
            counters,
            registry,
        })
    }

    pub const fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub const fn counters(&self) -> &OutcomeCounters {
        &self.counters
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Serve the outcome counters at `address` until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server stops.
    pub async fn serve_metrics(&self, address: &str) -> Result<(), MetricsError> {
        MetricsServer::bind(address, self.registry.clone())
            .await?
            .serve()
            .await
    }

    fn session(&self) -> RelaySession<M> {
        RelaySession::new(
            self.mailer.clone(),
            self.counters.clone(),
            self.config.timeout(),
        )
    }
}

impl<M: Mailer + Clone> Backend for RelayBackend<M> {
    type Session = RelaySession<M>;
    type Error = Infallible;

    fn login(&self, username: &str, _password: &str) -> Result<Self::Session, Infallible> {
        tracing::debug!(username, "Login accepted");
        Ok(self.session())
    }

    fn anonymous_login(&self) -> Result<Self::Session, Infallible> {
        tracing::debug!("Anonymous login accepted");
        Ok(self.session())
    }
}
