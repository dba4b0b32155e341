//! Target address validation.
//!
//! # Responsibilities
//! - Parse raw addresses from the target list
//! - Apply `https` when the address carries no scheme
//! - Produce a canonical, comparable form for the destination gate

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::{ParseError, Url};

/// Scheme applied to addresses that do not name one.
pub const DEFAULT_SCHEME: &str = "https";

/// An address that could not be turned into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid URL '{raw}': {source}")]
pub struct UrlError {
    /// The address as it appeared in the input.
    pub raw: String,
    #[source]
    pub source: ParseError,
}

/// A parsed, scheme-qualified destination.
///
/// Equality compares the normalized URL, so `bar.com`, `https://bar.com`
/// and `HTTPS://BAR.COM/` are all the same destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Borrow the underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Take the underlying URL.
    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = &self.0;
        let serialized = url.as_str();
        // A bare root path is an artifact of normalization, not part of the address.
        if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
            f.write_str(serialized.strip_suffix('/').unwrap_or(serialized))
        } else {
            f.write_str(serialized)
        }
    }
}

impl FromStr for ValidatedUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_url(s)
    }
}

/// Validate a raw address, defaulting the scheme to `https`.
pub fn validate_url(raw: &str) -> Result<ValidatedUrl, UrlError> {
    let parsed = match Url::parse(raw) {
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("{DEFAULT_SCHEME}://{raw}"))
        }
        other => other,
    };

    parsed.map(ValidatedUrl).map_err(|source| UrlError {
        raw: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scheme_defaults_to_https() {
        let url = validate_url("bar.com").unwrap();
        assert_eq!(url.as_url().scheme(), "https");
        assert_eq!(url.to_string(), "https://bar.com");

        let url = validate_url("bar.com/api/v1?x=1").unwrap();
        assert_eq!(url.to_string(), "https://bar.com/api/v1?x=1");
    }

    #[test]
    fn explicit_scheme_is_preserved() {
        for raw in ["http://other.com", "https://bar.com", "ftp://files.example"] {
            let url = validate_url(raw).unwrap();
            assert_eq!(url.to_string(), raw);
        }
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for raw in ["::::not a url", "", "http://exa mple.com", "https://[::1"] {
            let err = validate_url(raw).unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn normalized_forms_compare_equal() {
        let a: ValidatedUrl = "bar.com".parse().unwrap();
        let b: ValidatedUrl = "HTTPS://BAR.COM/".parse().unwrap();
        assert_eq!(a, b);

        let c: ValidatedUrl = "http://bar.com".parse().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn display_keeps_non_root_paths() {
        let url = validate_url("https://bar.com/").unwrap();
        assert_eq!(url.to_string(), "https://bar.com");

        let url = validate_url("https://bar.com/x/").unwrap();
        assert_eq!(url.to_string(), "https://bar.com/x/");
    }
}
