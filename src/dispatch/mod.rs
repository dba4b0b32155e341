//! Bounded-concurrency dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Target list + RequestTemplate
//!     → orchestrator.rs (one spawned worker per target, then wait)
//!     → worker.rs, per target:
//!         validate (net::address)
//!         → limiter.rs (admission slot, held to the end)
//!         → filter.rs (destination gate)
//!         → template.rs (per-target request)
//!         → send + body read under one deadline
//!         → report, stats.rs
//!     → tracker.rs (completion guard dropped)
//! ```
//!
//! # Design Decisions
//! - Worker failures are local: logged, counted, never propagated
//! - The limiter is the only shared mutable state touched by workers
//!   besides the outcome counters
//! - Template and client are shared read-only across workers

pub mod error;
pub mod filter;
pub mod limiter;
pub mod orchestrator;
pub mod stats;
pub mod template;
pub mod tracker;
pub mod worker;

pub use error::{DispatchError, StartupError, StartupResult};
pub use filter::DestinationFilter;
pub use limiter::{AdmissionSlot, ConcurrencyLimiter};
pub use orchestrator::{run, Dispatcher};
pub use stats::{DispatchStats, RunSummary};
pub use template::{Payload, RequestTemplate, TemplateError};
pub use tracker::{CompletionGuard, CompletionTracker};
pub use worker::{dispatch, DispatchContext, DispatchId, DispatchOutcome};
