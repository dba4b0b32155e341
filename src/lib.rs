//! Bounded-concurrency HTTP dispatcher library.
//!
//! Reads a list of target locations, sends one templated POST per allowed
//! target with at most N requests in flight, and reports each response
//! independently.

pub mod config;
pub mod dispatch;
pub mod input;
pub mod net;
pub mod observability;

pub use config::FanoutConfig;
pub use dispatch::{run, Dispatcher, RunSummary};
