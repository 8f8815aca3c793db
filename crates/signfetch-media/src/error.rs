//! Error types for media extraction.
//!
//! Only failures that abort a whole run are represented here. Per-candidate
//! failures (an undecodable string, a 404 on one URL, a failed write) are
//! logged and skipped by the extraction passes instead.

use std::io;
use std::path::PathBuf;

use signfetch_auth::AuthError;

/// Errors that abort a signfetch run.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Credentials were missing or produced an unusable header.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The signed request itself could not be sent.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The request URL.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Failures reported by an [`HttpTransport`](crate::transport::HttpTransport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call did not complete within its timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, DNS, TLS, or protocol failure.
    #[error("{0}")]
    Request(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Convenience result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
