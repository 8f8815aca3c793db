//! Scoped signing key derivation.

use digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Literal terminating every credential scope.
pub const SCOPE_TERMINATOR: &str = "request";

type HmacSha256 = Hmac<Sha256>;

/// Derive the signing key for one date, region and service.
///
/// ```text
/// DateKey              = HMAC-SHA256(secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "request")
/// ```
///
/// The secret is used as the first key verbatim, with no prefix.
///
/// # Examples
///
/// ```
/// use signfetch_auth::derive_signing_key;
///
/// let key = derive_signing_key("secret", "20210818", "cn-north-1", "cv");
/// assert_eq!(key.len(), 32);
/// assert_eq!(key, derive_signing_key("secret", "20210818", "cn-north-1", "cv"));
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(secret_key.as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, SCOPE_TERMINATOR.as_bytes())
}

/// Compute the HMAC-SHA256 of `data` with `signing_key`, hex-encoded.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(key)
        .expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
