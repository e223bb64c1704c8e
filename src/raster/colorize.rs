//! Raster colorization.
//!
//! Turns a numeric grid into a transparent-background RGBA overlay. Missing
//! cells (NaN), and under the log scale non-positive cells, come out fully
//! transparent; every other cell gets the configured opacity. Transparency is
//! all-or-nothing.

use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::encode::EncodedImage;
use super::grid::{check_distinct_dims, LabeledGrid, DEFAULT_X_DIM, DEFAULT_Y_DIM};
use super::normalize::{Normalization, Scale};
use crate::colormaps::{self, quantize, Colormap};
use crate::error::{BasinvizError, Result};
use crate::logging::{log_raster_stats, log_timed_operation};

/// Styling for one colorized layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorizeOptions {
    /// Registered colormap name (e.g. `viridis`, `RdBu_r`, `Greens`)
    pub colormap: String,
    /// Value mapped to the low end of the colormap
    pub value_min: f64,
    /// Value mapped to the high end of the colormap
    pub value_max: f64,
    /// Logarithmic instead of linear scaling
    #[serde(default)]
    pub log_scale: bool,
    /// Alpha of every drawn cell, in `[0, 1]`
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Name of the row axis
    #[serde(default = "default_y_dim")]
    pub y_dim: String,
    /// Name of the column axis
    #[serde(default = "default_x_dim")]
    pub x_dim: String,
}

impl ColorizeOptions {
    pub fn new(colormap: &str, value_min: f64, value_max: f64) -> Self {
        Self {
            colormap: colormap.to_string(),
            value_min,
            value_max,
            log_scale: false,
            opacity: default_opacity(),
            y_dim: default_y_dim(),
            x_dim: default_x_dim(),
        }
    }

    pub fn with_log_scale(mut self, log_scale: bool) -> Self {
        self.log_scale = log_scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_spatial_dims(mut self, y_dim: &str, x_dim: &str) -> Self {
        self.y_dim = y_dim.to_string();
        self.x_dim = x_dim.to_string();
        self
    }

    pub fn scale(&self) -> Scale {
        if self.log_scale {
            Scale::Log
        } else {
            Scale::Linear
        }
    }

    /// Validated normalization for these options
    pub fn normalization(&self) -> Result<Normalization> {
        Normalization::new(self.value_min, self.value_max, self.scale())
    }

    /// Check range, opacity and colormap without touching any data
    pub fn validate(&self) -> Result<()> {
        self.normalization()?;
        check_distinct_dims(&self.y_dim, &self.x_dim)?;

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(BasinvizError::InvalidParameter {
                param: "opacity".to_string(),
                message: format!("must be within [0, 1], got {}", self.opacity),
            });
        }

        if !colormaps::is_registered(&self.colormap) {
            return Err(BasinvizError::UnknownColormap {
                name: self.colormap.clone(),
            });
        }

        Ok(())
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_y_dim() -> String {
    DEFAULT_Y_DIM.to_string()
}

fn default_x_dim() -> String {
    DEFAULT_X_DIM.to_string()
}

/// Colorize a grid into a PNG overlay.
///
/// Fails with [`BasinvizError::InvalidRange`] before reading the grid when the
/// range is unusable, including `log_scale` with `value_min <= 0`.
pub fn colorize(
    grid: &LabeledGrid,
    colormap_name: &str,
    value_min: f64,
    value_max: f64,
    log_scale: bool,
) -> Result<EncodedImage> {
    let options = ColorizeOptions::new(colormap_name, value_min, value_max).with_log_scale(log_scale);
    colorize_with(grid, &options)
}

/// Colorize a grid using a full set of options
pub fn colorize_with(grid: &LabeledGrid, options: &ColorizeOptions) -> Result<EncodedImage> {
    options.validate()?;
    let slice = grid.to_spatial_2d(&options.y_dim, &options.x_dim)?;
    colorize_array(slice.view(), options)
}

/// Colorize a plain `(row, column)` array
pub fn colorize_array(data: ArrayView2<f64>, options: &ColorizeOptions) -> Result<EncodedImage> {
    options.validate()?;
    let norm = options.normalization()?;
    let cmap = colormaps::get_colormap(&options.colormap)?;

    log_timed_operation("colorize", || {
        let img = render_rgba(data, cmap.as_ref(), &norm, options.opacity)?;
        let encoded = EncodedImage::from_rgba(&img)?;

        let invalid = data.iter().filter(|v| !norm.is_valid(**v)).count();
        log_raster_stats(cmap.name(), data.dim(), invalid, encoded.png_bytes().len());
        Ok(encoded)
    })
}

/// Render the RGBA pixels of a `(row, column)` array.
///
/// Row 0 becomes the top pixel row. Channels are quantized by truncation.
pub fn render_rgba(
    data: ArrayView2<f64>,
    cmap: &dyn Colormap,
    norm: &Normalization,
    opacity: f64,
) -> Result<RgbaImage> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Err(BasinvizError::invalid_shape(format!(
            "cannot render an empty {}x{} grid",
            rows, cols
        )));
    }
    let width = u32::try_from(cols)
        .map_err(|_| BasinvizError::invalid_shape(format!("{} columns is too wide", cols)))?;
    let height = u32::try_from(rows)
        .map_err(|_| BasinvizError::invalid_shape(format!("{} rows is too tall", rows)))?;

    debug!(
        rows = rows,
        cols = cols,
        colormap = cmap.name(),
        scale = ?norm.scale(),
        "Rendering raster"
    );

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let value = data[[y as usize, x as usize]];
        Rgba(cell_color(value, cmap, norm, opacity))
    });
    Ok(img)
}

fn cell_color(value: f64, cmap: &dyn Colormap, norm: &Normalization, opacity: f64) -> [u8; 4] {
    if value.is_nan() {
        return [0, 0, 0, 0];
    }

    let [r, g, b, _] = cmap.rgba(norm.normalize(value));
    let alpha = if norm.is_valid(value) { opacity } else { 0.0 };
    quantize([r, g, b, alpha])
}
