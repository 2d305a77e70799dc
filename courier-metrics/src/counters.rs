//! Delivery outcome counters
//!
//! One counter family partitioned by `status`. Increments are atomic, so any
//! number of relay sessions may record concurrently while the exporter reads.

use std::fmt;

use prometheus::{IntCounterVec, Opts, Registry};

use crate::{MESSAGES_METRIC, MetricsError};

/// Result of a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Fail,
}

impl Outcome {
    /// Label value used for the `status` dimension
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, monotonically increasing counts of delivery outcomes
///
/// Cloning is cheap and every clone increments the same underlying series.
#[derive(Clone)]
pub struct OutcomeCounters {
    messages: IntCounterVec,
}

impl fmt::Debug for OutcomeCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeCounters")
            .field("success", &self.get(Outcome::Success))
            .field("fail", &self.get(Outcome::Fail))
            .finish()
    }
}

impl OutcomeCounters {
    /// Create the counter family and register it with `registry`
    ///
    /// Both `status` series are created up front so that a scrape reports
    /// zero rather than omitting them.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::AlreadyRegistered`] if the family already exists
    /// in `registry`.
    pub fn register(registry: &Registry) -> Result<Self, MetricsError> {
        let messages = IntCounterVec::new(
            Opts::new(MESSAGES_METRIC, "A counter for messages sent"),
            &["status"],
        )?;

        for outcome in [Outcome::Success, Outcome::Fail] {
            messages.with_label_values(&[outcome.as_str()]);
        }

        registry.register(Box::new(messages.clone()))?;

        tracing::debug!(metric = MESSAGES_METRIC, "Outcome counters registered");

        Ok(Self { messages })
    }

    /// Record one delivery attempt
    pub fn record(&self, outcome: Outcome) {
        self.messages.with_label_values(&[outcome.as_str()]).inc();
    }

    /// Current count for `outcome`
    #[must_use]
    pub fn get(&self, outcome: Outcome) -> u64 {
        self.messages.with_label_values(&[outcome.as_str()]).get()
    }

    /// Total attempts recorded across both outcomes
    #[must_use]
    pub fn total(&self) -> u64 {
        self.get(Outcome::Success) + self.get(Outcome::Fail)
    }
}
