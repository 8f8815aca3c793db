//! Common type definitions shared across crates.

use std::fmt;

use http::Uri;

use crate::error::{SignfetchError, SignfetchResult};

/// Remote service endpoint (scheme + authority, optionally a path).
///
/// The signed `host` header is derived from the endpoint, so an endpoint
/// must always carry a host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    /// Default endpoint of the visual generation service.
    pub const DEFAULT: &'static str = "https://visual.volcengineapi.com";

    /// Parse and validate an endpoint.
    ///
    /// A trailing slash is removed so that the query string can be appended
    /// directly.
    ///
    /// # Errors
    /// Returns an error if the value is not an absolute `http`/`https` URL
    /// with a host.
    pub fn new(url: impl Into<String>) -> SignfetchResult<Self> {
        let url = url.into();
        let uri: Uri = url
            .parse()
            .map_err(|_| SignfetchError::InvalidEndpoint(url.clone()))?;

        let scheme_ok = matches!(uri.scheme_str(), Some("http" | "https"));
        if !scheme_ok || uri.host().is_none_or(str::is_empty) {
            return Err(SignfetchError::InvalidEndpoint(url));
        }

        Ok(Self(url.trim_end_matches('/').to_owned()))
    }

    /// The host component used for the signed `host` header.
    ///
    /// A non-default port is kept, matching what HTTP clients send in `Host`.
    #[must_use]
    pub fn host(&self) -> String {
        // Validated in `new`; the empty fallback is unreachable for constructed values.
        let Ok(uri) = self.0.parse::<Uri>() else {
            return String::new();
        };
        let host = uri.host().unwrap_or_default();
        match (uri.scheme_str(), uri.port_u16()) {
            (Some("http"), Some(80)) | (Some("https"), Some(443)) | (_, None) => host.to_owned(),
            (_, Some(port)) => format!("{host}:{port}"),
        }
    }

    /// The URI path, normalized to `/` when empty.
    #[must_use]
    pub fn path(&self) -> String {
        self.0
            .parse::<Uri>()
            .ok()
            .map(|uri| uri.path().to_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_owned())
    }

    /// Build the request URL for the given canonical query string.
    #[must_use]
    pub fn url_with_query(&self, query: &str) -> String {
        if query.is_empty() {
            self.0.clone()
        } else {
            format!("{}?{query}", self.0)
        }
    }

    /// Get the endpoint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl TryFrom<String> for Endpoint {
    type Error = SignfetchError;

    fn try_from(url: String) -> SignfetchResult<Self> {
        Self::new(url)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
