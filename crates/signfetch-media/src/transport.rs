//! Blocking HTTP transport.
//!
//! All network access goes through [`HttpTransport`], so the orchestration
//! logic can be exercised with an in-memory fake. [`ReqwestTransport`] is the
//! production implementation.

use std::time::Duration;

use http::HeaderMap;
use reqwest::header::{HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::TransportError;

/// User agent sent on every request.
const USER_AGENT_VALUE: &str = concat!("signfetch/", env!("CARGO_PKG_VERSION"));

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is exactly 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sequential, blocking HTTP operations.
pub trait HttpTransport {
    /// POST `body` to `url` with `headers`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: String,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;

    /// GET `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a blocking `reqwest` client.
///
/// Must not be constructed or used from within an async runtime's worker
/// threads; wrap calls in `spawn_blocking` there.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    fn finish(
        url: &str,
        result: reqwest::Result<reqwest::blocking::Response>,
    ) -> Result<HttpResponse, TransportError> {
        let response = result.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(map_error)?.to_vec();

        debug!(url, status, size = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: String,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let result = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .timeout(timeout)
            .send();
        Self::finish(url, result)
    }

    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let result = self.client.get(url).timeout(timeout).send();
        Self::finish(url, result)
    }
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(e.to_string())
    }
}
