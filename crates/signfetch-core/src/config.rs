//! Configuration management for signfetch.
//!
//! All configuration is driven by environment variables. Credentials are read
//! here but never serialized or logged.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{SignfetchError, SignfetchResult};
use crate::types::Endpoint;

/// Default timeout for the signed POST, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default timeout for each artifact download, in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Global configuration for a signfetch run.
///
/// # Examples
///
/// ```
/// use signfetch_core::SignfetchConfig;
///
/// let config = SignfetchConfig::default();
/// assert_eq!(config.region, "cn-north-1");
/// assert_eq!(config.download_timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SignfetchConfig {
    /// Service endpoint the signed request is POSTed to.
    #[builder(default)]
    pub endpoint: Endpoint,

    /// Region component of the credential scope.
    #[builder(default = String::from("cn-north-1"))]
    pub region: String,

    /// Service component of the credential scope.
    #[builder(default = String::from("cv"))]
    pub service: String,

    /// `Action` query parameter.
    #[builder(default = String::from("CVProcess"))]
    pub action: String,

    /// `Version` query parameter.
    #[builder(default = String::from("2022-08-31"))]
    pub version: String,

    /// Access key id.
    #[serde(skip)]
    #[builder(default, setter(strip_option))]
    pub access_key: Option<String>,

    /// Secret access key.
    #[serde(skip)]
    #[builder(default, setter(strip_option))]
    pub secret_key: Option<String>,

    /// Directory that receives decoded and downloaded artifacts.
    #[builder(default = String::from("generated_images"))]
    pub output_dir: String,

    /// Timeout for the signed POST.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Timeout for each artifact download.
    #[builder(default = DEFAULT_DOWNLOAD_TIMEOUT_SECS)]
    pub download_timeout_secs: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for SignfetchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SignfetchConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SIGNFETCH_ENDPOINT` | `https://visual.volcengineapi.com` |
    /// | `SIGNFETCH_REGION` | `cn-north-1` |
    /// | `SIGNFETCH_SERVICE` | `cv` |
    /// | `SIGNFETCH_ACTION` | `CVProcess` |
    /// | `SIGNFETCH_VERSION` | `2022-08-31` |
    /// | `SIGNFETCH_ACCESS_KEY` / `ACCESS_KEY` | *(unset)* |
    /// | `SIGNFETCH_SECRET_KEY` / `SECRET_KEY` | *(unset)* |
    /// | `SIGNFETCH_OUTPUT_DIR` | `generated_images` |
    /// | `SIGNFETCH_REQUEST_TIMEOUT_SECS` | `60` |
    /// | `SIGNFETCH_DOWNLOAD_TIMEOUT_SECS` | `30` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Errors
    ///
    /// Returns an error if `SIGNFETCH_ENDPOINT` is not a valid endpoint or a
    /// timeout is not a positive integer.
    pub fn from_env() -> SignfetchResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`SignfetchConfig::from_env`] delegates here; tests pass a map-backed
    /// lookup instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SignfetchResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("SIGNFETCH_ENDPOINT") {
            config.endpoint = Endpoint::new(v)?;
        }
        if let Some(v) = lookup("SIGNFETCH_REGION") {
            config.region = v;
        }
        if let Some(v) = lookup("SIGNFETCH_SERVICE") {
            config.service = v;
        }
        if let Some(v) = lookup("SIGNFETCH_ACTION") {
            config.action = v;
        }
        if let Some(v) = lookup("SIGNFETCH_VERSION") {
            config.version = v;
        }
        config.access_key = lookup("SIGNFETCH_ACCESS_KEY").or_else(|| lookup("ACCESS_KEY"));
        config.secret_key = lookup("SIGNFETCH_SECRET_KEY").or_else(|| lookup("SECRET_KEY"));
        if let Some(v) = lookup("SIGNFETCH_OUTPUT_DIR") {
            config.output_dir = v;
        }
        if let Some(v) = lookup("SIGNFETCH_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_secs("SIGNFETCH_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("SIGNFETCH_DOWNLOAD_TIMEOUT_SECS") {
            config.download_timeout_secs = parse_secs("SIGNFETCH_DOWNLOAD_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// Query parameters sent with every signed request.
    #[must_use]
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("Action".to_owned(), self.action.clone()),
            ("Version".to_owned(), self.version.clone()),
        ]
    }
}

/// Parse a positive number of seconds.
fn parse_secs(name: &str, value: &str) -> SignfetchResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SignfetchError::Config(format!(
            "{name} must be a positive integer, got {value:?}"
        ))),
    }
}
