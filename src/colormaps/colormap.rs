//! Colormap trait and registry.
//!
//! This module defines the common interface for all colormaps and resolves
//! colormap names (matplotlib-style, case-insensitive, with an optional `_r`
//! suffix for the reversed ramp) to implementations.

use crate::error::{BasinvizError, Result};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value to unit RGBA channels.
    ///
    /// Values outside `[0, 1]` saturate to the end colors.
    fn rgba(&self, value: f64) -> [f64; 4];

    /// Map a normalized value to 8-bit RGBA
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        quantize(self.rgba(value))
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Reversed view of another colormap (`<name>_r`)
pub struct Reversed {
    inner: Box<dyn Colormap>,
    name: String,
}

impl Reversed {
    pub fn new(inner: Box<dyn Colormap>) -> Self {
        let name = format!("{}_r", inner.name());
        Self { inner, name }
    }
}

impl Colormap for Reversed {
    fn rgba(&self, value: f64) -> [f64; 4] {
        self.inner.rgba(1.0 - value.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Names accepted by [`get_colormap`], without the `_r` variants.
pub const COLORMAP_NAMES: &[&str] = &[
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "greens", "blues", "reds",
    "greys", "oranges", "purples", "ylgnbu", "ylorrd", "rdbu", "brbg", "spectral", "rdylbu",
    "puor", "coolwarm", "seismic", "tab10", "set1",
];

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    let lowered = name.to_lowercase();
    if let Some(base) = lowered.strip_suffix("_r") {
        return lookup(base)
            .map(|cmap| Box::new(Reversed::new(cmap)) as Box<dyn Colormap>)
            .ok_or_else(|| BasinvizError::UnknownColormap {
                name: name.to_string(),
            });
    }

    lookup(&lowered).ok_or_else(|| BasinvizError::UnknownColormap {
        name: name.to_string(),
    })
}

/// Whether `name` resolves to a registered colormap
pub fn is_registered(name: &str) -> bool {
    let lowered = name.to_lowercase();
    let base = lowered.strip_suffix("_r").unwrap_or(&lowered);
    COLORMAP_NAMES.contains(&base)
}

fn lookup(name: &str) -> Option<Box<dyn Colormap>> {
    use super::{diverging::*, palette::*, sequential::*};

    let cmap: Box<dyn Colormap> = match name {
        "viridis" => Box::new(GradientColormap::new("viridis", colorgrad::viridis())),
        "plasma" => Box::new(GradientColormap::new("plasma", colorgrad::plasma())),
        "inferno" => Box::new(GradientColormap::new("inferno", colorgrad::inferno())),
        "magma" => Box::new(GradientColormap::new("magma", colorgrad::magma())),
        "cividis" => Box::new(GradientColormap::new("cividis", colorgrad::cividis())),
        "turbo" => Box::new(GradientColormap::new("turbo", colorgrad::turbo())),
        "greens" => Box::new(GradientColormap::new("greens", colorgrad::greens())),
        "blues" => Box::new(GradientColormap::new("blues", colorgrad::blues())),
        "reds" => Box::new(GradientColormap::new("reds", colorgrad::reds())),
        "greys" => Box::new(GradientColormap::new("greys", colorgrad::greys())),
        "oranges" => Box::new(GradientColormap::new("oranges", colorgrad::oranges())),
        "purples" => Box::new(GradientColormap::new("purples", colorgrad::purples())),
        "ylgnbu" => Box::new(GradientColormap::new("ylgnbu", colorgrad::yl_gn_bu())),
        "ylorrd" => Box::new(GradientColormap::new("ylorrd", colorgrad::yl_or_rd())),
        "rdbu" => Box::new(GradientColormap::new("rdbu", colorgrad::rd_bu())),
        "brbg" => Box::new(GradientColormap::new("brbg", colorgrad::br_bg())),
        "spectral" => Box::new(GradientColormap::new("spectral", colorgrad::spectral())),
        "rdylbu" => Box::new(GradientColormap::new("rdylbu", colorgrad::rd_yl_bu())),
        "puor" => Box::new(GradientColormap::new("puor", colorgrad::pu_or())),
        "coolwarm" => Box::new(coolwarm()),
        "seismic" => Box::new(seismic()),
        "tab10" => Box::new(tab10()),
        "set1" => Box::new(set1()),
        _ => return None,
    };
    Some(cmap)
}

/// Quantize unit RGBA channels to 8 bits by truncation (`(c * 255) as u8`).
pub fn quantize(rgba: [f64; 4]) -> [u8; 4] {
    rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Linear interpolation between two unit RGB colors
pub fn lerp_color(c1: [f64; 3], c2: [f64; 3], t: f64) -> [f64; 3] {
    [
        c1[0] * (1.0 - t) + c2[0] * t,
        c1[1] * (1.0 - t) + c2[1] * t,
        c1[2] * (1.0 - t) + c2[2] * t,
    ]
}

/// Convert an 8-bit RGB triple to unit channels
pub(crate) fn unit_rgb(c: [u8; 3]) -> [f64; 3] {
    [c[0] as f64 / 255.0, c[1] as f64 / 255.0, c[2] as f64 / 255.0]
}
