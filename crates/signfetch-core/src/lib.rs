//! Core types, configuration, and errors for signfetch.
//!
//! This crate provides the pieces shared by the signing and media crates:
//! environment-driven configuration, the service endpoint type, and the core
//! error type.

mod config;
mod error;
mod types;

pub use config::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, SignfetchConfig};
pub use error::{SignfetchError, SignfetchResult};
pub use types::Endpoint;
