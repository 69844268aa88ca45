//! Avatar payload decoding
//!
//! Avatars travel as base64 text. Decoding only validates the payload and
//! identifies the image container from its signature; pixels are left to
//! whatever surface finally draws them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Reasons an avatar payload is rejected
#[derive(Debug, Error, PartialEq)]
pub enum AvatarError {
    #[error("avatar payload is empty")]
    Empty,
    #[error("avatar payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("avatar payload has an unrecognized image signature")]
    UnknownFormat,
}

/// Image container formats accepted for avatars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    /// Identify a format from the leading bytes of an image
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }
}

/// A decoded avatar image
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl Avatar {
    /// Decode a base64 payload, accepting an optional `data:<mime>;base64,` prefix
    pub fn decode(payload: &str) -> Result<Self, AvatarError> {
        let trimmed = payload.trim();
        let encoded = match trimmed.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(""),
            None => trimmed,
        };
        // Line-wrapped base64 is common in API payloads
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(AvatarError::Empty);
        }

        let bytes = STANDARD.decode(compact.as_bytes())?;
        let format = ImageFormat::sniff(&bytes).ok_or(AvatarError::UnknownFormat)?;
        Ok(Self { format, bytes })
    }

    /// Re-encode as a `data:` URI for embedding
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}
