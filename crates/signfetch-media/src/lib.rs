//! Media extraction from generative API responses.
//!
//! The response schema is not fixed, so artifacts are found heuristically:
//! the JSON document is scanned for inline base64 payloads first, and only if
//! none of them decodes and saves are URL candidates downloaded instead.
//!
//! # Usage
//!
//! ```rust,no_run
//! use signfetch_auth::TimeContext;
//! use signfetch_core::SignfetchConfig;
//! use signfetch_media::{MediaClient, ReqwestTransport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SignfetchConfig::from_env()?;
//! let client = MediaClient::new(&config, ReqwestTransport::new()?)?;
//!
//! let outcome = client.generate(
//!     config.query_params(),
//!     r#"{"req_key":"jimeng_t2i_v40","prompt":"a red fox"}"#,
//!     &TimeContext::now(),
//! )?;
//! for path in &outcome.saved {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - Sign, send, and run both extraction passes
//! - [`decoder`] - Lenient base64 decoding
//! - [`error`] - Run-aborting error types
//! - [`fetcher`] - Sequential URL downloads
//! - [`format`] - Magic-byte and URL extension detection
//! - [`scanner`] - Schema-free candidate discovery
//! - [`store`] - Artifact naming and persistence
//! - [`transport`] - Blocking HTTP seam

pub mod client;
pub mod decoder;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod scanner;
pub mod store;
pub mod transport;

pub use client::{ArtifactSource, ExtractionOutcome, MediaClient};
pub use error::{MediaError, MediaResult, TransportError};
pub use format::ImageFormat;
pub use store::{Artifact, ArtifactWriter};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
