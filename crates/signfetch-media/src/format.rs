//! Binary format detection.
//!
//! Response payloads carry no trustworthy MIME metadata, so formats are
//! inferred from leading magic bytes or, for downloads, from the URL text.

use std::fmt;

/// Image format inferred from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// `89 50 4E 47 0D 0A 1A 0A`
    Png,
    /// `FF D8`
    Jpg,
    /// `RIFF....WEBP`
    Webp,
    /// `GIF87a` / `GIF89a`
    Gif,
    /// `BM`
    Bmp,
    /// Anything else.
    Bin,
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// URL extension hints, in match order.
const URL_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".webp", ".gif", ".bmp"];

impl ImageFormat {
    /// Classify `data` by its leading bytes. First match wins; unknown data is
    /// [`ImageFormat::Bin`].
    ///
    /// # Examples
    ///
    /// ```
    /// use signfetch_media::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_magic(b"GIF89a..."), ImageFormat::Gif);
    /// assert_eq!(ImageFormat::from_magic(b"hello"), ImageFormat::Bin);
    /// ```
    #[must_use]
    pub fn from_magic(data: &[u8]) -> Self {
        if data.starts_with(PNG_SIGNATURE) {
            Self::Png
        } else if data.starts_with(b"\xff\xd8") {
            Self::Jpg
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Self::Webp
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Self::Gif
        } else if data.starts_with(b"BM") {
            Self::Bmp
        } else {
            Self::Bin
        }
    }

    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Bin => "bin",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Guess a file extension from the URL text.
///
/// Case-insensitive substring match, so `.../img.PNG?x=1` and
/// `.../a.png/webp` both yield `png`.
#[must_use]
pub fn extension_from_url(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    URL_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| lower.contains(*ext))
        .map(|ext| ext.trim_start_matches('.'))
}

/// Pick the extension for a downloaded artifact: URL hint first, magic bytes second.
#[must_use]
pub fn extension_for_download(url: &str, data: &[u8]) -> &'static str {
    extension_from_url(url).unwrap_or_else(|| ImageFormat::from_magic(data).extension())
}
