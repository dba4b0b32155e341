//! http-fanout: POST one request per target location, a bounded number at a time.
//!
//! # Architecture Overview
//!
//! ```text
//!   input.txt ──▶ input ──▶ dispatch::orchestrator ──spawn──▶ dispatch::worker × N targets
//!                                  │                              │
//!                                  │                              ├─ net::address   (validate)
//!                                  │                              ├─ limiter        (admission)
//!                                  │                              ├─ filter         (destination gate)
//!                                  │                              ├─ template       (per-target request)
//!                                  │                              └─ net::client    (shared pool) ──▶ destination
//!                                  │
//!                                  └── tracker.wait() ◀── completion guard dropped by each worker
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use http_fanout::config::{load_config, validate_config, ConfigError, FanoutConfig};
use http_fanout::dispatch::StartupError;
use http_fanout::observability::{init_logging, init_metrics};

#[derive(Parser, Debug)]
#[command(name = "http-fanout", version)]
#[command(about = "POST a JSON payload to every allowed location in a target list", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target list (JSON array of {"location": ...})
    #[arg(short, long)]
    input: Option<String>,

    /// Maximum concurrent requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Allowed destination (repeatable; replaces the configured list)
    #[arg(long = "allow", value_name = "URL")]
    allow: Vec<String>,

    /// Send to every valid location
    #[arg(long)]
    allow_any: bool,

    /// Value of the payload's `data` field
    #[arg(long)]
    data: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut FanoutConfig) {
        let dispatch = &mut config.dispatch;
        if let Some(input) = &self.input {
            dispatch.input_path = input.clone();
        }
        if let Some(concurrency) = self.concurrency {
            dispatch.max_concurrency = concurrency;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            dispatch.request_timeout_ms = timeout_ms;
        }
        if !self.allow.is_empty() {
            dispatch.allowed_destinations = self.allow.clone();
        }
        if self.allow_any {
            dispatch.allow_any_destination = true;
        }
        if let Some(data) = &self.data {
            dispatch.payload_data = data.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FanoutConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config)
        .map_err(|errors| StartupError::Config(ConfigError::Validation(errors)))?;

    init_logging(&config.observability).map_err(StartupError::from)?;

    tracing::info!(
        input = %config.dispatch.input_path,
        max_concurrency = config.dispatch.max_concurrency,
        request_timeout_ms = config.dispatch.request_timeout_ms,
        allow_any_destination = config.dispatch.allow_any_destination,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr).map_err(StartupError::from)?;
    }

    if let Err(e) = http_fanout::run(&config).await {
        tracing::error!(error = %e, "Aborting");
        return Err(e.into());
    }

    Ok(())
}
