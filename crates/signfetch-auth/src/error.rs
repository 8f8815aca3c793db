//! Error types for request signing.

/// Errors that can occur while preparing a signed request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The access key, the secret key, or both were not supplied.
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// A computed header value contains bytes that are not valid in HTTP headers.
    #[error("Invalid header value for {0}")]
    InvalidHeaderValue(&'static str),
}
