//! HMAC-SHA256 request signing for signfetch.
//!
//! This crate implements the client side of a SigV4-style scheme: a scoped
//! signing key is derived from a long-lived secret through a chain of
//! HMAC-SHA256 operations, and used to sign a canonical representation of the
//! outgoing request.
//!
//! # Usage
//!
//! ```rust
//! use signfetch_auth::{Credential, RequestSigner, SigningRequest, TimeContext, format_query};
//!
//! let credential = Credential::new("AKEXAMPLE", "secret").unwrap();
//! let signer = RequestSigner::new("cn-north-1", "cv");
//! let query = format_query([("Version", "2022-08-31"), ("Action", "CVProcess")]);
//!
//! let headers = signer.sign(
//!     &credential,
//!     &TimeContext::now(),
//!     &SigningRequest {
//!         method: "POST",
//!         path: "/",
//!         query: &query,
//!         host: "visual.volcengineapi.com",
//!         body: "{}",
//!     },
//! );
//! assert!(headers.authorization.starts_with("HMAC-SHA256 Credential=AKEXAMPLE/"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request and query string construction
//! - [`credentials`] - Access key / secret key pair
//! - [`error`] - Signing error types
//! - [`signer`] - String to sign, signature, and `Authorization` header
//! - [`signing_key`] - Scoped signing key derivation
//! - [`time`] - Per-request timestamp and date stamp

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod signer;
pub mod signing_key;
pub mod time;

pub use canonical::format_query;
pub use credentials::Credential;
pub use error::AuthError;
pub use signer::{RequestSigner, SignedHeaders, SigningRequest, SigningScope, hash_payload};
pub use signing_key::derive_signing_key;
pub use time::TimeContext;
