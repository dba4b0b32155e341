//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dispatcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Endpoint the destination gate admits when nothing else is configured.
pub const DEFAULT_DESTINATION: &str = "https://bar.com";

/// Root configuration for the dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FanoutConfig {
    /// Dispatch behavior (input, concurrency, deadline, gate, payload).
    pub dispatch: DispatchConfig,

    /// Shared HTTP transport settings.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Path to the JSON target list.
    pub input_path: String,

    /// Maximum number of simultaneously admitted dispatches.
    pub max_concurrency: usize,

    /// Deadline for one dispatch (send + body read) in milliseconds.
    pub request_timeout_ms: u64,

    /// Destinations a validated target must equal to be sent.
    pub allowed_destinations: Vec<String>,

    /// Send to every valid target, ignoring `allowed_destinations`.
    pub allow_any_destination: bool,

    /// Value of the `data` field in the request body.
    pub payload_data: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            input_path: "./input.txt".to_string(),
            max_concurrency: 10,
            request_timeout_ms: 5_000,
            allowed_destinations: vec![DEFAULT_DESTINATION.to_string()],
            allow_any_destination: false,
            payload_data: "example data".to_string(),
        }
    }
}

/// Connection pool and handshake settings for the shared client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum idle pooled connections kept per host.
    pub max_idle_connections: usize,

    /// How long an idle pooled connection is kept, in seconds.
    pub idle_timeout_secs: u64,

    /// Connection establishment (TCP + TLS handshake) timeout in seconds.
    pub handshake_timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_idle_connections: 100,
            idle_timeout_secs: 90,
            handshake_timeout_secs: 10,
            user_agent: concat!("http-fanout/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
