//! PNG encoding and `data:` URIs.
//!
//! Overlays are handed to map front ends as self-describing
//! `data:image/png;base64,<payload>` strings: an RGBA PNG, base64 encoded with
//! the standard alphabet and padding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::error::{BasinvizError, Result};

/// Prefix of every image reference produced by this crate
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// An RGBA PNG held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    /// Encode an RGBA raster as PNG
    pub fn from_rgba(img: &RgbaImage) -> Result<Self> {
        Ok(Self {
            png: encode_png(img)?,
            width: img.width(),
            height: img.height(),
        })
    }

    /// Parse a `data:image/png;base64,` URI back into an image
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let payload = uri
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| BasinvizError::DataUri {
                message: format!("expected prefix '{}'", DATA_URI_PREFIX),
            })?;
        let png = STANDARD
            .decode(payload)
            .map_err(|e| BasinvizError::DataUri {
                message: e.to_string(),
            })?;

        let img = decode_png(&png)?;
        Ok(Self {
            png,
            width: img.width(),
            height: img.height(),
        })
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Base64 payload without the media-type prefix
    pub fn base64_payload(&self) -> String {
        STANDARD.encode(&self.png)
    }

    /// The embeddable `data:image/png;base64,...` reference
    pub fn to_data_uri(&self) -> String {
        format!("{}{}", DATA_URI_PREFIX, self.base64_payload())
    }

    /// Decode the PNG back to RGBA pixels
    pub fn decode_rgba(&self) -> Result<RgbaImage> {
        decode_png(&self.png)
    }

    /// Write the raw PNG bytes to a file
    pub fn write_png(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.png)?;
        Ok(())
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DATA_URI_PREFIX, self.base64_payload())
    }
}

/// Encode an RGBA raster as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| BasinvizError::ImageEncoding {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer.into_inner())
}

/// Decode PNG bytes to an RGBA raster
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
        BasinvizError::ImageEncoding {
            message: format!("Failed to decode PNG: {}", e),
        }
    })?;
    Ok(img.to_rgba8())
}
