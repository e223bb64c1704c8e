//! Error types for basinviz.
//!
//! A single error enum covers every failure the library can report. Conditions
//! that are not errors (a river with no boundary crossing, an empty river set,
//! an all-missing grid) never produce one of these.

use thiserror::Error;

/// The main error type for basinviz operations.
#[derive(Error, Debug)]
pub enum BasinvizError {
    /// Value range that cannot be normalized (reversed, empty, non-finite, or
    /// a non-positive lower bound under logarithmic scaling)
    #[error("Invalid range: [{min}, {max}] - {message}")]
    InvalidRange { min: f64, max: f64, message: String },

    /// Colormap name not present in the registry
    #[error("Unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// Grid shape or axis layout the operation cannot handle
    #[error("Invalid grid shape: {message}")]
    InvalidShape { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Malformed or unsupported geometry input
    #[error("Geometry error: {message}")]
    Geometry { message: String },

    /// PNG encoding or decoding errors
    #[error("Image encoding error: {message}")]
    ImageEncoding { message: String },

    /// Malformed `data:` URI
    #[error("Invalid data URI: {message}")]
    DataUri { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// GeoJSON parsing or geometry conversion errors
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Arrow table construction or IPC errors
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}

impl BasinvizError {
    pub(crate) fn invalid_range(min: f64, max: f64, message: impl Into<String>) -> Self {
        BasinvizError::InvalidRange {
            min,
            max,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_shape(message: impl Into<String>) -> Self {
        BasinvizError::InvalidShape {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with BasinvizError
pub type Result<T> = std::result::Result<T, BasinvizError>;
