//! Base64 candidate decoding.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tracing::{debug, warn};

use crate::format::ImageFormat;
use crate::store::{Artifact, ArtifactWriter};

/// Prefix of data URIs whose header is stripped before decoding.
const DATA_IMAGE_PREFIX: &str = "data:image/";

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode a base64 candidate.
///
/// A `data:image/...;base64,` header is removed first, as is any ASCII
/// whitespace. Standard base64 is tried before URL-safe base64; padding may
/// be present or absent. Returns `None` if neither alphabet decodes or the
/// result is empty.
///
/// # Examples
///
/// ```
/// use signfetch_media::decoder::decode_candidate;
///
/// assert_eq!(decode_candidate("R0lGODlh").as_deref(), Some(&b"GIF89a"[..]));
/// assert_eq!(decode_candidate("data:image/gif;base64,R0lGODlh").as_deref(), Some(&b"GIF89a"[..]));
/// assert_eq!(decode_candidate("not base64!"), None);
/// ```
#[must_use]
pub fn decode_candidate(candidate: &str) -> Option<Vec<u8>> {
    let payload = strip_data_uri(candidate);
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD_LENIENT
        .decode(&compact)
        .or_else(|_| URL_SAFE_LENIENT.decode(&compact))
        .ok()?;

    (!bytes.is_empty()).then_some(bytes)
}

fn strip_data_uri(candidate: &str) -> &str {
    if candidate.starts_with(DATA_IMAGE_PREFIX) {
        if let Some((_, rest)) = candidate.split_once(',') {
            return rest;
        }
    }
    candidate
}

/// Decode every candidate and save the ones that decode, in order.
///
/// Undecodable candidates and failed writes are skipped; neither consumes a
/// sequence index.
pub fn save_decoded<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    writer: &mut ArtifactWriter,
) -> Vec<Artifact> {
    let mut saved = Vec::new();

    for (position, candidate) in candidates.into_iter().enumerate() {
        let Some(bytes) = decode_candidate(candidate) else {
            debug!(position, len = candidate.len(), "candidate is not base64, skipping");
            continue;
        };

        let format = ImageFormat::from_magic(&bytes);
        match writer.write(&bytes, format.extension()) {
            Ok(artifact) => saved.push(artifact),
            Err(e) => {
                warn!(position, error = %e, "failed to write decoded artifact");
            }
        }
    }

    saved
}
