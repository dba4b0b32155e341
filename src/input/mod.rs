//! Target list input.
//!
//! The target list is a JSON array of records, each at least
//! `{ "location": "<address>" }`. Unknown fields are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One destination read from the target list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    /// Raw, unvalidated address.
    #[serde(rename = "location")]
    pub address: String,
}

impl Target {
    /// Create a target from a raw address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Errors reading or parsing the target list.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("error reading target list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing target list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and parse the target list at `path`.
pub fn load_targets(path: &Path) -> Result<Vec<Target>, InputError> {
    let content = fs::read(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let targets = parse_targets(&content)?;

    tracing::info!(path = %path.display(), targets = targets.len(), "Target list loaded");
    Ok(targets)
}

/// Parse a target list from raw JSON bytes.
pub fn parse_targets(content: &[u8]) -> Result<Vec<Target>, InputError> {
    Ok(serde_json::from_slice(content)?)
}
