//! # basinviz
//!
//! Map-overlay building blocks for flood and river studies.
//!
//! This library turns gridded scalar fields into transparent PNG overlays and
//! finds where river lines leave the combined boundary of a set of basin
//! polygons.
//!
//! ## Key Features
//!
//! - **Raster colorization**: linear or logarithmic scaling through named,
//!   matplotlib-style colormaps, with missing cells left transparent
//! - **Self-contained images**: PNG output as raw bytes, files or
//!   `data:image/png;base64,` URIs
//! - **Boundary crossings**: one selected exit point per river, exported as
//!   GeoJSON or an Arrow IPC stream
//!
//! ## Architecture
//!
//! - **Colormaps**: name registry over continuous, table and palette ramps
//! - **Raster**: labeled grids, normalization, colorization, colorbars, PNG encoding
//! - **Geometry**: GeoJSON features, polygon union, segment intersection

pub mod colormaps;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod raster;

pub use config::{Config, LayerConfig};
pub use error::{BasinvizError, Result};
pub use geometry::{
    basin_boundary, find_basin_exits, find_crossings, find_crossings_with, Crossing,
    CrossingSelector, CrossingTable, FeatureLayer, LineFeature, PolygonFeature,
};
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation,
};
pub use raster::{
    colorize, colorize_with, render_colorbar, ColorizeOptions, EncodedImage, LabeledGrid,
    OverlayBounds,
};
