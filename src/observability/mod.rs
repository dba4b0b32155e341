//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch workers and orchestrator produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
