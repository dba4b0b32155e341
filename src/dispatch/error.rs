//! Dispatch and startup error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;
use crate::dispatch::template::TemplateError;
use crate::input::InputError;
use crate::net::{UrlError, ValidatedUrl};

/// Failures local to one dispatch. Logged and discarded at the worker boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The target address could not be parsed.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The dispatch deadline elapsed before the response was fully read.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: ValidatedUrl, timeout: Duration },

    /// Transport failure while sending.
    #[error("error sending request to {url}: {source}")]
    Send {
        url: ValidatedUrl,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read.
    #[error("error reading response body from {url}: {source}")]
    BodyRead {
        url: ValidatedUrl,
        #[source]
        source: reqwest::Error,
    },

    /// The admission limiter was closed while waiting for a slot.
    #[error("admission limiter closed")]
    LimiterClosed,
}

impl DispatchError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::InvalidUrl(_) => "invalid_url",
            DispatchError::Timeout { .. } => "timeout",
            DispatchError::Send { .. } => "send_error",
            DispatchError::BodyRead { .. } => "body_read_error",
            DispatchError::LimiterClosed => "limiter_closed",
        }
    }
}

/// Fatal errors raised before any dispatch begins.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("error building request template: {0}")]
    Encoding(#[from] TemplateError),

    #[error("invalid allowed destination: {0}")]
    Destination(#[from] UrlError),

    #[error("error building HTTP client: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("error initializing logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("error installing metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Result type for startup operations.
pub type StartupResult<T> = Result<T, StartupError>;
