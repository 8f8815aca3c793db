//! Long-lived signing credentials.

use std::fmt;

use crate::error::AuthError;

/// An access key / secret key pair.
///
/// Both halves are required; a `Credential` can only be constructed when both
/// are present and non-empty, so signing never proceeds with partial
/// credentials. The secret is redacted from the `Debug` output.
///
/// # Examples
///
/// ```
/// use signfetch_auth::Credential;
///
/// let credential = Credential::new("AKEXAMPLE", "secret").unwrap();
/// assert_eq!(credential.access_key(), "AKEXAMPLE");
/// assert!(format!("{credential:?}").contains("<redacted>"));
///
/// assert!(Credential::from_parts(Some("AKEXAMPLE".into()), None).is_err());
/// ```
#[derive(Clone)]
pub struct Credential {
    access_key: String,
    secret_key: String,
}

impl Credential {
    /// Create a credential from both halves.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if either half is empty.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, AuthError> {
        Self::from_parts(Some(access_key.into()), Some(secret_key.into()))
    }

    /// Create a credential from optional halves, e.g. as read from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] naming the missing half.
    pub fn from_parts(
        access_key: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, AuthError> {
        let access_key = access_key.filter(|k| !k.is_empty());
        let secret_key = secret_key.filter(|k| !k.is_empty());

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Self {
                access_key,
                secret_key,
            }),
            (None, None) => Err(AuthError::MissingCredentials(
                "access key and secret key are not set",
            )),
            (None, Some(_)) => Err(AuthError::MissingCredentials("access key is not set")),
            (Some(_), None) => Err(AuthError::MissingCredentials("secret key is not set")),
        }
    }

    /// The access key id, sent in clear in the `Authorization` header.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key. Only the key deriver should read this.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
