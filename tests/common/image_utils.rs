//! Image inspection utilities for testing.
//!
//! This module decodes the data URIs produced by the colorizer and exposes
//! the pixels and alpha channel for assertions.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};

use basinviz::raster::DATA_URI_PREFIX;

/// Split a data URI and decode its base64 payload to PNG bytes
pub fn png_bytes_from_uri(uri: &str) -> Vec<u8> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .unwrap_or_else(|| panic!("not a PNG data URI: {}", &uri[..uri.len().min(40)]));
    STANDARD.decode(payload).expect("payload is not valid base64")
}

/// Decode a data URI to its RGBA raster
pub fn rgba_from_uri(uri: &str) -> RgbaImage {
    let bytes = png_bytes_from_uri(uri);
    assert_eq!(
        image::guess_format(&bytes).expect("unrecognized image bytes"),
        ImageFormat::Png
    );
    image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .expect("payload is not a decodable PNG")
        .to_rgba8()
}

/// The alpha channel of every pixel, row-major
pub fn alpha_channel(img: &RgbaImage) -> Vec<u8> {
    img.pixels().map(|p| p.0[3]).collect()
}

/// Whether every pixel is fully transparent
pub fn is_fully_transparent(img: &RgbaImage) -> bool {
    alpha_channel(img).iter().all(|a| *a == 0)
}

/// Check that an image has the expected dimensions
pub fn assert_image_dimensions(img: &RgbaImage, expected_width: u32, expected_height: u32) {
    assert_eq!(
        img.dimensions(),
        (expected_width, expected_height),
        "Image dimensions differ"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_transparency_check() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        assert!(is_fully_transparent(&img));
        img.put_pixel(1, 1, Rgba([1, 2, 3, 4]));
        assert!(!is_fully_transparent(&img));
        assert_eq!(alpha_channel(&img), vec![0, 0, 0, 4]);
    }
}
