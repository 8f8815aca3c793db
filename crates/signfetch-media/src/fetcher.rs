//! URL candidate downloads.

use std::time::Duration;

use tracing::{debug, warn};

use crate::format::extension_for_download;
use crate::store::{Artifact, ArtifactWriter};
use crate::transport::HttpTransport;

/// Downloads URL candidates one at a time.
#[derive(Debug)]
pub struct ArtifactFetcher<'a, T: ?Sized> {
    transport: &'a T,
    timeout: Duration,
}

impl<'a, T: HttpTransport + ?Sized> ArtifactFetcher<'a, T> {
    /// Create a fetcher using `transport` with the given per-download timeout.
    pub fn new(transport: &'a T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Download a single URL, returning the body only for a 200 response.
    #[must_use]
    pub fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        match self.transport.get(url, self.timeout) {
            Ok(response) if response.is_ok() => Some(response.body),
            Ok(response) => {
                debug!(url, status = response.status, "download rejected, skipping");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "download failed, skipping");
                None
            }
        }
    }

    /// Download every URL in order and save each successful body.
    ///
    /// Failed downloads and failed writes are skipped without consuming a
    /// sequence index.
    pub fn download_all<'u>(
        &self,
        urls: impl IntoIterator<Item = &'u str>,
        writer: &mut ArtifactWriter,
    ) -> Vec<Artifact> {
        let mut saved = Vec::new();

        for url in urls {
            let Some(bytes) = self.fetch(url) else {
                continue;
            };

            let extension = extension_for_download(url, &bytes);
            match writer.write(&bytes, extension) {
                Ok(artifact) => saved.push(artifact),
                Err(e) => warn!(url, error = %e, "failed to write downloaded artifact"),
            }
        }

        saved
    }
}
