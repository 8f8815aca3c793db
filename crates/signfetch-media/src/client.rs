//! Request orchestration.
//!
//! [`MediaClient::generate`] runs one complete exchange:
//!
//! 1. Sign the request body and query with the configured credential.
//! 2. POST it to the endpoint.
//! 3. Parse the response as JSON.
//! 4. Decode and save base64 candidates; stop if any were saved.
//! 5. Otherwise download and save URL candidates.
//!
//! URL candidates are never fetched when at least one base64 artifact was
//! saved, even if the response also carries URLs.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use signfetch_auth::{Credential, RequestSigner, SigningRequest, TimeContext, format_query};
use signfetch_core::{Endpoint, SignfetchConfig};
use tracing::{debug, info, warn};

use crate::decoder::save_decoded;
use crate::error::{MediaError, MediaResult};
use crate::fetcher::ArtifactFetcher;
use crate::scanner::{collect_base64_candidates, collect_url_candidates};
use crate::store::ArtifactWriter;
use crate::transport::HttpTransport;

/// Number of characters of the response body included in logs.
const PREVIEW_CHARS: usize = 300;

/// Where the saved artifacts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSource {
    /// Decoded from inline base64.
    Base64,
    /// Downloaded from URLs in the response.
    Url,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    /// Paths of every artifact written, in order.
    pub saved: Vec<PathBuf>,
    /// Which pass produced `saved`; `None` when nothing was saved.
    pub source: Option<ArtifactSource>,
}

impl ExtractionOutcome {
    /// Whether at least one artifact was saved.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.saved.is_empty()
    }

    fn none() -> Self {
        Self::default()
    }
}

/// Signs requests, sends them, and extracts media from the responses.
#[derive(Debug)]
pub struct MediaClient<T> {
    transport: T,
    endpoint: Endpoint,
    signer: RequestSigner,
    credential: Credential,
    output_dir: PathBuf,
    request_timeout: Duration,
    download_timeout: Duration,
}

impl<T: HttpTransport> MediaClient<T> {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Auth`] if the access key or secret key is missing.
    pub fn new(config: &SignfetchConfig, transport: T) -> MediaResult<Self> {
        let credential =
            Credential::from_parts(config.access_key.clone(), config.secret_key.clone())?;

        Ok(Self {
            transport,
            endpoint: config.endpoint.clone(),
            signer: RequestSigner::new(config.region.clone(), config.service.clone()),
            credential,
            output_dir: PathBuf::from(&config.output_dir),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            download_timeout: Duration::from_secs(config.download_timeout_secs),
        })
    }

    /// The transport this client sends requests through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign and send `body` with `query`, then extract artifacts from the response.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Transport`] if the POST itself fails,
    /// [`MediaError::Auth`] if the signed headers are not valid header values,
    /// and [`MediaError::OutputDir`] if the output directory cannot be created.
    /// A response that is not JSON, or contains no artifacts, is not an error.
    pub fn generate<K, V>(
        &self,
        query: impl IntoIterator<Item = (K, V)>,
        body: &str,
        time: &TimeContext,
    ) -> MediaResult<ExtractionOutcome>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let canonical_query = format_query(query);
        let host = self.endpoint.host();
        let path = self.endpoint.path();

        let signed = self.signer.sign(
            &self.credential,
            time,
            &SigningRequest {
                method: "POST",
                path: &path,
                query: &canonical_query,
                host: &host,
                body,
            },
        );
        let headers = signed.to_header_map()?;
        let url = self.endpoint.url_with_query(&canonical_query);

        info!(url = %url, "sending signed request");

        let response = self
            .transport
            .post(&url, headers, body.to_owned(), self.request_timeout)
            .map_err(|source| MediaError::Transport {
                url: url.clone(),
                source,
            })?;

        info!(
            status = response.status,
            preview = %preview(&response.body),
            "received response"
        );

        self.extract(&response.body)
    }

    /// Parse a raw response body and extract artifacts from it.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::OutputDir`] if the output directory cannot be created.
    pub fn extract(&self, body: &[u8]) -> MediaResult<ExtractionOutcome> {
        match serde_json::from_slice::<Value>(body) {
            Ok(document) => self.extract_document(&document),
            Err(e) => {
                warn!(error = %e, "failed to parse response JSON");
                Ok(ExtractionOutcome::none())
            }
        }
    }

    /// Extract artifacts from an already-parsed response document.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::OutputDir`] if the output directory cannot be created.
    pub fn extract_document(&self, document: &Value) -> MediaResult<ExtractionOutcome> {
        if !document.is_object() {
            warn!("response JSON is not an object");
            return Ok(ExtractionOutcome::none());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| MediaError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let candidates = collect_base64_candidates(document);
        debug!(count = candidates.len(), "collected base64 candidates");

        let mut writer = ArtifactWriter::generated(&self.output_dir, Utc::now().timestamp());
        let decoded = save_decoded(candidates, &mut writer);
        if !decoded.is_empty() {
            info!(count = decoded.len(), "saved base64 artifacts");
            return Ok(ExtractionOutcome {
                saved: decoded.into_iter().map(|a| a.path).collect(),
                source: Some(ArtifactSource::Base64),
            });
        }

        let urls = collect_url_candidates(document);
        info!(count = urls.len(), "no base64 artifacts, trying URL candidates");

        let fetcher = ArtifactFetcher::new(&self.transport, self.download_timeout);
        let mut writer = ArtifactWriter::downloaded(&self.output_dir, Utc::now().timestamp());
        let downloaded = fetcher.download_all(urls, &mut writer);
        if downloaded.is_empty() {
            warn!("no artifacts found in response");
            return Ok(ExtractionOutcome::none());
        }

        info!(count = downloaded.len(), "saved downloaded artifacts");
        Ok(ExtractionOutcome {
            saved: downloaded.into_iter().map(|a| a.path).collect(),
            source: Some(ArtifactSource::Url),
        })
    }
}

/// A short, single-line preview of a response body for logging.
fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .replace("\\u0026", "&")
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
