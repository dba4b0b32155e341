//! Destination gate.
//!
//! Only targets whose validated URL equals an allowed endpoint are sent.
//! Everything else that validates is skipped without an error.

use crate::config::DispatchConfig;
use crate::net::{validate_url, UrlError, ValidatedUrl};

/// Decides whether a validated destination may be contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationFilter {
    /// Exact match against a fixed set of endpoints.
    AllowList(Vec<ValidatedUrl>),
    /// Every valid destination is sent.
    Any,
}

impl DestinationFilter {
    /// Allow exactly one endpoint.
    pub fn single(endpoint: ValidatedUrl) -> Self {
        DestinationFilter::AllowList(vec![endpoint])
    }

    /// Build the gate from dispatch configuration.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, UrlError> {
        if config.allow_any_destination {
            return Ok(DestinationFilter::Any);
        }

        let endpoints = config
            .allowed_destinations
            .iter()
            .map(|raw| validate_url(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DestinationFilter::AllowList(endpoints))
    }

    /// Compares normalized URLs: `Bar.com` and `https://bar.com/` both match `https://bar.com`.
    pub fn allows(&self, url: &ValidatedUrl) -> bool {
        match self {
            DestinationFilter::AllowList(endpoints) => endpoints.contains(url),
            DestinationFilter::Any => true,
        }
    }
}
