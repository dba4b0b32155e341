//! Prototype request shared by every dispatch.
//!
//! The template is built once and never mutated. Each dispatch derives its own
//! `reqwest::Request` from it with only the destination replaced.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::DEFAULT_DESTINATION;

/// Errors building a request template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("error encoding request body: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("invalid placeholder destination: {0}")]
    Destination(#[from] url::ParseError),
}

/// Request body sent to every destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub data: String,
}

impl Payload {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// An immutable prototype POST request.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    destination: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestTemplate {
    /// Serialize `body` as JSON and wrap it in a POST template.
    pub fn build<T: Serialize + ?Sized>(body: &T) -> Result<Self, TemplateError> {
        let encoded = serde_json::to_vec(body)?;
        let destination = Url::parse(DEFAULT_DESTINATION)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            method: Method::POST,
            destination,
            headers,
            body: Bytes::from(encoded),
        })
    }

    /// Derive a request aimed at `destination`. The template is left untouched.
    pub fn instantiate(&self, destination: Url) -> reqwest::Request {
        let mut request = reqwest::Request::new(self.method.clone(), destination);
        *request.headers_mut() = self.headers.clone();
        // Bytes clones share the encoded buffer.
        *request.body_mut() = Some(self.body.clone().into());
        request
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Placeholder destination; every dispatch replaces it.
    pub fn destination(&self) -> &Url {
        &self.destination
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
