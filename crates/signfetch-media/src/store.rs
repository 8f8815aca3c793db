//! Artifact persistence.
//!
//! Artifacts are written as flat files named
//! `<prefix>_<unix_timestamp>_<index>.<ext>`. The index counts successful
//! writes only, so a failed candidate never leaves a gap.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::info;

/// Prefix for artifacts decoded from inline base64.
pub const GENERATED_PREFIX: &str = "generated";

/// Prefix for artifacts downloaded from URLs.
pub const DOWNLOADED_PREFIX: &str = "downloaded";

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// File extension (without the dot).
    pub extension: &'static str,
    /// Number of bytes written.
    pub size: usize,
}

/// Writes artifacts of one kind into one directory.
///
/// The timestamp and sequence index are owned by the writer; separate
/// extraction passes never share naming state.
#[derive(Debug)]
pub struct ArtifactWriter {
    dir: PathBuf,
    prefix: &'static str,
    timestamp: i64,
    next_index: usize,
}

impl ArtifactWriter {
    /// Create a writer for `prefix` files stamped with `timestamp`.
    pub fn new(dir: impl Into<PathBuf>, prefix: &'static str, timestamp: i64) -> Self {
        Self {
            dir: dir.into(),
            prefix,
            timestamp,
            next_index: 0,
        }
    }

    /// Writer for decoded (`generated_*`) artifacts.
    pub fn generated(dir: impl Into<PathBuf>, timestamp: i64) -> Self {
        Self::new(dir, GENERATED_PREFIX, timestamp)
    }

    /// Writer for downloaded (`downloaded_*`) artifacts.
    pub fn downloaded(dir: impl Into<PathBuf>, timestamp: i64) -> Self {
        Self::new(dir, DOWNLOADED_PREFIX, timestamp)
    }

    /// The path the next successful write will use.
    #[must_use]
    pub fn next_path(&self, extension: &str) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_{}.{extension}",
            self.prefix, self.timestamp, self.next_index
        ))
    }

    /// Write `bytes` to the next path and advance the index.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be written; the index is not
    /// advanced in that case.
    pub fn write(&mut self, bytes: &[u8], extension: &'static str) -> io::Result<Artifact> {
        let path = self.next_path(extension);
        fs::write(&path, bytes)?;
        self.next_index += 1;

        info!(path = %path.display(), size = bytes.len(), extension, "saved artifact");

        Ok(Artifact {
            path,
            extension,
            size: bytes.len(),
        })
    }
}
