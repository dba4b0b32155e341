//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fanout_dispatch_total` (counter): finished dispatches by outcome
//! - `fanout_dispatch_duration_seconds` (histogram): dispatch latency by outcome
//! - `fanout_admitted` (gauge): dispatches currently holding an admission slot
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_outcome(outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!("fanout_dispatch_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("fanout_dispatch_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

pub fn set_admitted(admitted: usize) {
    ::metrics::gauge!("fanout_admitted").set(admitted as f64);
}
