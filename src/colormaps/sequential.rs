//! Continuous colormaps sampled from `colorgrad` presets.
//!
//! Each ramp is sampled into a fixed lookup table and indexed the way
//! matplotlib indexes its own colormaps: `floor(t * N)`, clipped to the last
//! entry. This covers the sequential ramps and the gradient-based diverging
//! ramps alike.

use super::colormap::Colormap;

/// Number of lookup-table entries per continuous colormap
pub const LUT_SIZE: usize = 256;

/// Colormap backed by a sampled `colorgrad` gradient
pub struct GradientColormap {
    name: String,
    lut: Vec<[f64; 4]>,
}

impl GradientColormap {
    pub fn new(name: &str, gradient: colorgrad::Gradient) -> Self {
        let lut = gradient
            .colors(LUT_SIZE)
            .into_iter()
            .map(|c| [c.r, c.g, c.b, c.a])
            .collect();
        Self {
            name: name.to_string(),
            lut,
        }
    }

    /// Lookup-table index for a normalized value
    pub fn index_of(&self, value: f64) -> usize {
        let n = self.lut.len();
        let scaled = (value.clamp(0.0, 1.0) * n as f64).floor() as usize;
        scaled.min(n - 1)
    }
}

impl Colormap for GradientColormap {
    fn rgba(&self, value: f64) -> [f64; 4] {
        self.lut[self.index_of(value)]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
