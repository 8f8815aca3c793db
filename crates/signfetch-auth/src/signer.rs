//! Request signing.
//!
//! The signing flow:
//!
//! 1. Hash the request body (SHA-256, hex).
//! 2. Build the canonical headers block and canonical request.
//! 3. Build the string to sign from the timestamp, credential scope, and
//!    canonical request hash.
//! 4. Derive the signing key from the secret key and credential scope.
//! 5. Sign the string to sign and assemble the `Authorization` header.
//!
//! The main entry point is [`RequestSigner::sign`]. Signing is a pure function
//! of its inputs; the caller supplies the [`TimeContext`].

use std::fmt;

use http::HeaderMap;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::canonical::{self, SIGNED_HEADERS};
use crate::credentials::Credential;
use crate::error::AuthError;
use crate::signing_key::{SCOPE_TERMINATOR, compute_signature, derive_signing_key};
use crate::time::TimeContext;

/// Algorithm literal used in the string to sign and the `Authorization` header.
pub const ALGORITHM: &str = "HMAC-SHA256";

/// Header carrying the request timestamp.
pub const X_DATE: &str = "x-date";

/// Header carrying the payload hash.
pub const X_CONTENT_SHA256: &str = "x-content-sha256";

/// Credential scope binding a signature to a date, region, and service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningScope<'a> {
    /// Date stamp (`YYYYMMDD`).
    pub date_stamp: &'a str,
    /// Region name.
    pub region: &'a str,
    /// Service name.
    pub service: &'a str,
}

impl fmt::Display for SigningScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{SCOPE_TERMINATOR}",
            self.date_stamp, self.region, self.service
        )
    }
}

/// The parts of an outgoing request that participate in the signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// HTTP method, e.g. `POST`.
    pub method: &'a str,
    /// URI path, e.g. `/`.
    pub path: &'a str,
    /// Canonical query string (see [`canonical::format_query`]).
    pub query: &'a str,
    /// Value of the signed `host` header.
    pub host: &'a str,
    /// Serialized request body.
    pub body: &'a str,
}

/// Headers produced by signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `X-Date` value.
    pub x_date: String,
    /// `Authorization` value.
    pub authorization: String,
    /// `X-Content-Sha256` value.
    pub x_content_sha256: String,
    /// `Content-Type` value.
    pub content_type: String,
    /// Hex signature embedded in `authorization`.
    pub signature: String,
}

impl SignedHeaders {
    /// Convert into an [`http::HeaderMap`] ready to attach to a request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidHeaderValue`] if a value contains bytes
    /// that are not permitted in HTTP header values (e.g. a control character
    /// in the access key).
    pub fn to_header_map(&self) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(HeaderName::from_static(X_DATE), header_value(&self.x_date, "X-Date")?);
        headers.insert(
            AUTHORIZATION,
            header_value(&self.authorization, "Authorization")?,
        );
        headers.insert(
            HeaderName::from_static(X_CONTENT_SHA256),
            header_value(&self.x_content_sha256, "X-Content-Sha256")?,
        );
        headers.insert(
            CONTENT_TYPE,
            header_value(&self.content_type, "Content-Type")?,
        );
        Ok(headers)
    }
}

/// Signs requests for one region and service.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use signfetch_auth::{Credential, RequestSigner, SigningRequest, TimeContext};
///
/// let signer = RequestSigner::new("cn-north-1", "cv");
/// let credential = Credential::new("AKEXAMPLE", "secret").unwrap();
/// let time = TimeContext::from_datetime(Utc.with_ymd_and_hms(2021, 8, 18, 9, 57, 29).unwrap());
/// let request = SigningRequest {
///     method: "POST",
///     path: "/",
///     query: "Action=CVProcess&Version=2022-08-31",
///     host: "visual.volcengineapi.com",
///     body: "{}",
/// };
///
/// let headers = signer.sign(&credential, &time, &request);
/// assert!(headers.authorization.starts_with(
///     "HMAC-SHA256 Credential=AKEXAMPLE/20210818/cn-north-1/cv/request, SignedHeaders="
/// ));
/// assert_eq!(headers.x_date, "20210818T095729Z");
/// ```
#[derive(Debug, Clone)]
pub struct RequestSigner {
    region: String,
    service: String,
}

impl RequestSigner {
    /// Create a signer for the given region and service.
    pub fn new(region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
        }
    }

    /// The credential scope for the given time context.
    #[must_use]
    pub fn scope<'a>(&'a self, time: &'a TimeContext) -> SigningScope<'a> {
        SigningScope {
            date_stamp: time.date_stamp(),
            region: &self.region,
            service: &self.service,
        }
    }

    /// Build the canonical request for `request` at `time`.
    #[must_use]
    pub fn canonical_request(&self, time: &TimeContext, request: &SigningRequest<'_>) -> String {
        let payload_hash = hash_payload(request.body.as_bytes());
        let canonical_headers =
            canonical::build_canonical_headers(request.host, &payload_hash, time.timestamp());
        canonical::build_canonical_request(
            request.method,
            request.path,
            request.query,
            &canonical_headers,
            &payload_hash,
        )
    }

    /// Sign `request` with `credential` at `time`.
    #[must_use]
    pub fn sign(
        &self,
        credential: &Credential,
        time: &TimeContext,
        request: &SigningRequest<'_>,
    ) -> SignedHeaders {
        let payload_hash = hash_payload(request.body.as_bytes());
        let canonical_request = self.canonical_request(time, request);

        debug!(canonical_request, "Built canonical request");

        let canonical_hash = hash_payload(canonical_request.as_bytes());
        let scope = self.scope(time).to_string();
        let string_to_sign = build_string_to_sign(time.timestamp(), &scope, &canonical_hash);

        debug!(string_to_sign, "Built string to sign");

        let signing_key = derive_signing_key(
            credential.secret_key(),
            time.date_stamp(),
            &self.region,
            &self.service,
        );
        let signature = compute_signature(&signing_key, &string_to_sign);

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            credential.access_key()
        );

        SignedHeaders {
            x_date: time.timestamp().to_owned(),
            authorization,
            x_content_sha256: payload_hash,
            content_type: canonical::CONTENT_TYPE.to_owned(),
            signature,
        }
    }
}

/// Build the string to sign.
///
/// ```text
/// HMAC-SHA256\n
/// <timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Compute the SHA-256 hash of the given payload and return it as a hex string.
///
/// # Examples
///
/// ```
/// use signfetch_auth::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

fn header_value(value: &str, name: &'static str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|_| AuthError::InvalidHeaderValue(name))
}
