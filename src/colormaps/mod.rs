//! Colormap implementations for image generation.
//!
//! This module provides matplotlib-style named colormaps: continuous ramps,
//! table-defined diverging ramps and small categorical palettes.

pub mod colormap;
pub mod diverging;
pub mod palette;
pub mod sequential;

pub use colormap::{get_colormap, is_registered, quantize, Colormap, Reversed, COLORMAP_NAMES};

pub use diverging::{coolwarm, seismic, TableColormap};
pub use palette::{set1, tab10, ListedColormap};
pub use sequential::{GradientColormap, LUT_SIZE};
