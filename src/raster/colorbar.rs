//! Vertical colorbar images.
//!
//! Only the gradient strip is rendered; tick labels are left to whatever
//! front end places the image next to the map.

use image::{Rgba, RgbaImage};

use super::colorize::ColorizeOptions;
use super::encode::EncodedImage;
use crate::colormaps::{self, quantize};
use crate::error::{BasinvizError, Result};

/// Default colorbar size in pixels
pub const DEFAULT_COLORBAR_WIDTH: u32 = 16;
pub const DEFAULT_COLORBAR_HEIGHT: u32 = 256;

/// Render a vertical colorbar for a layer: `value_max` at the top row,
/// `value_min` at the bottom.
///
/// Under the log scale the strip is evenly spaced in log space, so every row
/// still steps the colormap by the same amount.
pub fn render_colorbar(options: &ColorizeOptions, width: u32, height: u32) -> Result<EncodedImage> {
    options.validate()?;
    if width == 0 || height == 0 {
        return Err(BasinvizError::InvalidParameter {
            param: "size".to_string(),
            message: format!("colorbar must be at least 1x1, got {}x{}", width, height),
        });
    }

    let cmap = colormaps::get_colormap(&options.colormap)?;
    let rows: Vec<[u8; 4]> = (0..height)
        .map(|row| {
            let [r, g, b, _] = cmap.rgba(row_position(row, height));
            quantize([r, g, b, options.opacity])
        })
        .collect();

    let img = RgbaImage::from_fn(width, height, |_, y| Rgba(rows[y as usize]));
    EncodedImage::from_rgba(&img)
}

/// Normalized colormap position of a pixel row, 1.0 at the top
fn row_position(row: u32, height: u32) -> f64 {
    if height == 1 {
        return 0.5;
    }
    (height - 1 - row) as f64 / (height - 1) as f64
}
