//! Metrics configuration

use serde::Deserialize;

/// Configuration for the metrics exporter
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Enable or disable the metrics exporter
    ///
    /// Counters are always recorded; this only controls whether they are served.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Address to bind the metrics exporter
    ///
    /// Common values:
    /// - `[::]:9090` (IPv6 any address, port 9090)
    /// - `0.0.0.0:9090` (IPv4 any address, port 9090)
    /// - `127.0.0.1:9090` (localhost only, port 9090)
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

const fn default_enabled() -> bool {
    true
}

fn default_listen_address() -> String {
    "[::]:9090".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            listen_address: default_listen_address(),
        }
    }
}
