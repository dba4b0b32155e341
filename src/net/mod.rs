//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Raw target address
//!     → address.rs (parse, default scheme, canonical form)
//!     → dispatch worker
//!     → client.rs (shared pooled client, reused by every dispatch)
//!     → Destination
//! ```
//!
//! # Design Decisions
//! - One client for the whole run; pooled connections are reused across dispatches
//! - Validation is pure and never touches the network

pub mod client;
pub mod address;

pub use self::client::build_client;
pub use self::address::{validate_url, UrlError, ValidatedUrl};
