//! Shared outbound HTTP client.
//!
//! One pooled client is built at startup and shared by every dispatch.

use std::time::Duration;

use crate::config::TransportConfig;

/// Build the shared connection-pooled client.
///
/// reqwest bounds idle connections per host and folds the TLS handshake into
/// the connect phase, so `handshake_timeout_secs` maps onto `connect_timeout`.
pub fn build_client(config: &TransportConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(config.max_idle_connections)
        .pool_idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_timeout(Duration::from_secs(config.handshake_timeout_secs))
        .user_agent(config.user_agent.clone());

    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }

    let client = builder.build()?;

    tracing::debug!(
        max_idle_connections = config.max_idle_connections,
        idle_timeout_secs = config.idle_timeout_secs,
        handshake_timeout_secs = config.handshake_timeout_secs,
        "HTTP client built"
    );

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        assert!(build_client(&TransportConfig::default()).is_ok());
    }

    #[test]
    fn builds_without_proxy() {
        let config = TransportConfig {
            use_system_proxy: false,
            ..TransportConfig::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
