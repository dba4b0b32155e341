//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, timeouts > 0)
//! - Check that every allowed destination is itself a valid URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FanoutConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::FanoutConfig;
use crate::net::address::validate_url;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &FanoutConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let dispatch = &config.dispatch;

    if dispatch.max_concurrency == 0 {
        errors.push(ValidationError::new(
            "dispatch.max_concurrency",
            "must be greater than zero",
        ));
    }

    if dispatch.request_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "dispatch.request_timeout_ms",
            "must be greater than zero",
        ));
    }

    if !dispatch.allow_any_destination {
        if dispatch.allowed_destinations.is_empty() {
            errors.push(ValidationError::new(
                "dispatch.allowed_destinations",
                "must not be empty unless allow_any_destination is set",
            ));
        }
        for destination in &dispatch.allowed_destinations {
            if let Err(e) = validate_url(destination) {
                errors.push(ValidationError::new(
                    "dispatch.allowed_destinations",
                    e.to_string(),
                ));
            }
        }
    }

    if config.transport.handshake_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "transport.handshake_timeout_secs",
            "must be greater than zero",
        ));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
