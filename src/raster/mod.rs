//! Raster overlays: labeled grids, normalization, colorization and encoding.

pub mod colorbar;
pub mod colorize;
pub mod encode;
pub mod grid;
pub mod normalize;

pub use colorbar::{render_colorbar, DEFAULT_COLORBAR_HEIGHT, DEFAULT_COLORBAR_WIDTH};
pub use colorize::{colorize, colorize_array, colorize_with, render_rgba, ColorizeOptions};
pub use encode::{decode_png, encode_png, EncodedImage, DATA_URI_PREFIX};
pub use grid::{LabeledGrid, OverlayBounds, DEFAULT_X_DIM, DEFAULT_Y_DIM};
pub use normalize::{Normalization, Scale};
