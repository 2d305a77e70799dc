use std::{future::Future, sync::Arc};

use courier_metrics::MetricsConfig;
use serde::Deserialize;

use crate::{RelayBackend, RelayConfig, internal, logging};

/// Top level configuration, as read from `courier.config.ron`
#[derive(Debug, Default, Deserialize)]
pub struct Courier {
    #[serde(alias = "relay", default)]
    pub mailgun: RelayConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

async fn shutdown() -> anyhow::Result<()> {
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        r = tokio::signal::ctrl_c() => {
            r?;
            internal!(level = INFO, "CTRL+C entered, shutting down");
        }
        _ = terminate.recv() => {
            internal!(level = INFO, "Terminate Signal received, shutting down");
        }
    };

    Ok(())
}

impl Courier {
    /// Parse a RON configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid RON for this structure.
    pub fn from_ron(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Apply `MAILGUN_DOMAIN` / `MAILGUN_PRIVATE_KEY` from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.mailgun.apply_overrides(|name| std::env::var(name).ok());
        self
    }

    /// Run the relay with no protocol engine attached
    ///
    /// Only the metrics exporter is served; see [`Courier::run_with`].
    ///
    /// # Errors
    ///
    /// See [`Courier::run_with`].
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with(|_| std::future::pending()).await
    }

    /// Run the relay, handing the backend to `engine`
    ///
    /// `engine` is expected to drive an SMTP server against the backend. The
    /// relay stops when the engine returns, the metrics exporter fails, or a
    /// shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the metrics exporter
    /// cannot be started or fails, or the engine reports an error.
    pub async fn run_with<F, Fut>(self, engine: F) -> anyhow::Result<()>
    where
        F: FnOnce(Arc<RelayBackend>) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let Self { mailgun, metrics } = self;

        logging::init();

        let backend = Arc::new(RelayBackend::new(mailgun)?);

        internal!(
            level = INFO,
            "Relaying for {} via {}",
            backend.config().domain,
            backend.config().api_base
        );

        let exporter = async {
            if metrics.enabled {
                backend.serve_metrics(&metrics.listen_address).await?;
            } else {
                internal!(level = INFO, "Metrics exporter disabled");
                std::future::pending::<()>().await;
            }

            anyhow::Ok(())
        };

        let ret = tokio::select! {
            r = engine(Arc::clone(&backend)) => r,
            r = exporter => r,
            r = shutdown() => r,
        };

        internal!(level = INFO, "Shutting down...");

        ret
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_document() {
        let courier = Courier::from_ron(
            r#"(
                mailgun: (
                    domain: "mg.example.com",
                    private_key: "key-123",
                    timeout_secs: 5,
                ),
                metrics: (
                    listen_address: "127.0.0.1:9100",
                ),
            )"#,
        )
        .unwrap();

        assert_eq!(courier.mailgun.domain, "mg.example.com");
        assert_eq!(courier.mailgun.timeout_secs, 5);
        assert!(courier.metrics.enabled);
        assert_eq!(courier.metrics.listen_address, "127.0.0.1:9100");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let courier = Courier::from_ron("()").unwrap();

        assert_eq!(courier.mailgun, RelayConfig::default());
        assert_eq!(courier.metrics.listen_address, "[::]:9090");
        assert!(courier.mailgun.validate().is_err());
    }

    #[test]
    fn test_malformed_document() {
        assert!(Courier::from_ron("(mailgun: 42)").is_err());
    }
}
