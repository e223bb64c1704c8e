//! Value normalization for colormap lookup.

use serde::{Deserialize, Serialize};

use crate::error::{BasinvizError, Result};

/// How values are spread over the colormap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

/// A validated `[min, max]` range and scale.
///
/// Construction fails up front for ranges that cannot be normalized, so no
/// grid data is ever touched with an invalid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    min: f64,
    max: f64,
    scale: Scale,
}

impl Normalization {
    pub fn new(min: f64, max: f64, scale: Scale) -> Result<Self> {
        if scale == Scale::Log && min <= 0.0 {
            return Err(BasinvizError::invalid_range(
                min,
                max,
                "logarithmic scale requires value_min > 0",
            ));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(BasinvizError::invalid_range(min, max, "bounds must be finite"));
        }
        if min >= max {
            return Err(BasinvizError::invalid_range(
                min,
                max,
                "value_min must be less than value_max",
            ));
        }

        Ok(Self { min, max, scale })
    }

    pub fn linear(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max, Scale::Linear)
    }

    pub fn log(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max, Scale::Log)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Whether a cell value is drawn (opaque) rather than transparent
    pub fn is_valid(&self, value: f64) -> bool {
        match self.scale {
            Scale::Linear => !value.is_nan(),
            Scale::Log => !value.is_nan() && value > 0.0,
        }
    }

    /// Map a value onto the unit interval. The result is not clipped.
    ///
    /// Under the log scale non-positive values are first replaced by `min`,
    /// so they land exactly on 0.
    pub fn normalize(&self, value: f64) -> f64 {
        match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Log => {
                let value = if value <= 0.0 { self.min } else { value };
                (value.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
            }
        }
    }
}
