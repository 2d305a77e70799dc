//! Outcome metrics for the courier relay
//!
//! Delivery outcomes are counted in a single Prometheus counter family,
//! `mailgun_messages`, partitioned by `status` (`success` or `fail`), and
//! exposed for scraping over HTTP.
//!
//! # Usage
//!
//! ```rust,no_run
//! use courier_metrics::{MetricsServer, Outcome, OutcomeCounters};
//! use courier_metrics::Registry;
//!
//! # async fn example() -> Result<(), courier_metrics::MetricsError> {
//! let registry = Registry::new();
//! let counters = OutcomeCounters::register(&registry)?;
//! counters.record(Outcome::Success);
//!
//! let server = MetricsServer::bind("127.0.0.1:9090", registry).await?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod counters;
mod error;
mod exporter;

pub use config::MetricsConfig;
pub use counters::{Outcome, OutcomeCounters};
pub use error::MetricsError;
pub use exporter::{METRICS_PATH, MetricsServer};
pub use prometheus::{Registry, default_registry};

/// Name of the delivery outcome counter family
pub const MESSAGES_METRIC: &str = "mailgun_messages";
