//! Error types for the signfetch core.

/// Core error type for signfetch infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum SignfetchError {
    /// The configured endpoint is not a usable absolute URL.
    #[error("invalid endpoint: {0} (must be an absolute http(s) URL with a host)")]
    InvalidEndpoint(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for signfetch core operations.
pub type SignfetchResult<T> = Result<T, SignfetchError>;
