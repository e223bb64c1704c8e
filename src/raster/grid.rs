//! Labeled n-dimensional grids.
//!
//! A [`LabeledGrid`] is an `ndarray` array with one name per axis and optional
//! coordinate values per axis. The colorizer only understands `(row, column)`
//! slices, so this module provides the axis plumbing around it: moving the
//! spatial axes last, resolving extra axes to one slice, and computing the
//! geographic bounds an overlay should be placed at.

use ndarray::{Array2, ArrayD, Axis, Ix2, IxDyn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::{BasinvizError, Result};

/// Default name of the row (northing / latitude) axis
pub const DEFAULT_Y_DIM: &str = "y";
/// Default name of the column (easting / longitude) axis
pub const DEFAULT_X_DIM: &str = "x";

/// An n-dimensional grid with named axes. NaN marks missing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledGrid {
    dims: Vec<String>,
    data: ArrayD<f64>,
    coords: BTreeMap<String, Vec<f64>>,
}

impl LabeledGrid {
    /// Create a grid, checking there is exactly one unique name per axis.
    pub fn new<S: Into<String>>(dims: Vec<S>, data: ArrayD<f64>) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();

        if dims.len() != data.ndim() {
            return Err(BasinvizError::invalid_shape(format!(
                "{} dimension names given for an array with {} axes",
                dims.len(),
                data.ndim()
            )));
        }

        for (i, name) in dims.iter().enumerate() {
            if dims[..i].contains(name) {
                return Err(BasinvizError::invalid_shape(format!(
                    "Duplicate dimension name: {}",
                    name
                )));
            }
        }

        Ok(Self {
            dims,
            data,
            coords: BTreeMap::new(),
        })
    }

    /// Wrap a plain 2D array as a `(y, x)` grid
    pub fn from_array2(data: Array2<f64>) -> Self {
        Self {
            dims: vec![DEFAULT_Y_DIM.to_string(), DEFAULT_X_DIM.to_string()],
            data: data.into_dyn(),
            coords: BTreeMap::new(),
        }
    }

    /// Attach coordinate values to a dimension
    pub fn with_coords(mut self, dim: &str, values: Vec<f64>) -> Result<Self> {
        let axis = self.axis_of(dim)?;
        let len = self.data.len_of(Axis(axis));
        if values.len() != len {
            return Err(BasinvizError::InvalidParameter {
                param: format!("coords.{}", dim),
                message: format!("expected {} values, got {}", len, values.len()),
            });
        }
        self.coords.insert(dim.to_string(), values);
        Ok(self)
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Coordinate values of a dimension, if any were attached
    pub fn coords(&self, dim: &str) -> Option<&[f64]> {
        self.coords.get(dim).map(Vec::as_slice)
    }

    /// Position of a named axis
    pub fn axis_of(&self, dim: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .ok_or_else(|| BasinvizError::InvalidParameter {
                param: "dim".to_string(),
                message: format!(
                    "Unknown dimension '{}', available: [{}]",
                    dim,
                    self.dims.join(", ")
                ),
            })
    }

    /// Reorder axes to `(..., y, x)`, keeping the relative order of the others.
    pub fn transpose_spatial_last(&self, y_dim: &str, x_dim: &str) -> Result<LabeledGrid> {
        check_distinct_dims(y_dim, x_dim)?;
        let y_axis = self.axis_of(y_dim)?;
        let x_axis = self.axis_of(x_dim)?;

        let mut order: Vec<usize> = (0..self.dims.len())
            .filter(|&i| i != y_axis && i != x_axis)
            .collect();
        order.push(y_axis);
        order.push(x_axis);

        let dims = order.iter().map(|&i| self.dims[i].clone()).collect();
        let data = self.data.view().permuted_axes(order.clone()).to_owned();

        Ok(LabeledGrid {
            dims,
            data,
            coords: self.coords.clone(),
        })
    }

    /// Resolve one axis to a single index, dropping that axis.
    pub fn select(&self, dim: &str, index: usize) -> Result<LabeledGrid> {
        let axis = self.axis_of(dim)?;
        let len = self.data.len_of(Axis(axis));
        if index >= len {
            return Err(BasinvizError::InvalidParameter {
                param: dim.to_string(),
                message: format!("index {} out of bounds for length {}", index, len),
            });
        }

        let mut dims = self.dims.clone();
        dims.remove(axis);
        let mut coords = self.coords.clone();
        coords.remove(dim);

        Ok(LabeledGrid {
            dims,
            data: self.data.index_axis(Axis(axis), index).to_owned(),
            coords,
        })
    }

    /// Resolve one axis to the index whose coordinate is closest to `value`.
    pub fn select_nearest(&self, dim: &str, value: f64) -> Result<LabeledGrid> {
        let coords = self
            .coords(dim)
            .ok_or_else(|| BasinvizError::InvalidParameter {
                param: dim.to_string(),
                message: "dimension has no coordinate values".to_string(),
            })?;

        let index = coords
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_nan())
            .min_by(|(_, a), (_, b)| {
                (*a - value)
                    .abs()
                    .partial_cmp(&(*b - value).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .ok_or_else(|| BasinvizError::InvalidParameter {
                param: dim.to_string(),
                message: "dimension has no usable coordinate values".to_string(),
            })?;

        debug!(dim = dim, value = value, index = index, "Selected nearest slice");
        self.select(dim, index)
    }

    /// Copy the `(y, x)` slice out of the grid.
    ///
    /// Axes other than `y` and `x` must have length 1; anything longer has to
    /// be resolved with [`select`](Self::select) first.
    pub fn to_spatial_2d(&self, y_dim: &str, x_dim: &str) -> Result<Array2<f64>> {
        let transposed = self.transpose_spatial_last(y_dim, x_dim)?;
        let leading = &transposed.dims[..transposed.dims.len() - 2];

        let mut view = transposed.data.view();
        for name in leading {
            if view.len_of(Axis(0)) != 1 {
                return Err(BasinvizError::invalid_shape(format!(
                    "dimension '{}' has length {}; select a single slice before colorizing",
                    name,
                    view.len_of(Axis(0))
                )));
            }
            view = view.index_axis_move(Axis(0), 0);
        }

        let slice = view
            .into_dimensionality::<Ix2>()
            .map_err(|e| BasinvizError::invalid_shape(e.to_string()))?;
        Ok(slice.to_owned())
    }

    /// Cell-edge bounds of the grid from its `y` and `x` coordinates.
    pub fn overlay_bounds(&self, y_dim: &str, x_dim: &str) -> Result<OverlayBounds> {
        let missing = |dim: &str| BasinvizError::InvalidParameter {
            param: dim.to_string(),
            message: "coordinates are required to compute overlay bounds".to_string(),
        };
        let ys = self.coords(y_dim).ok_or_else(|| missing(y_dim))?;
        let xs = self.coords(x_dim).ok_or_else(|| missing(x_dim))?;

        let too_short = |dim: &str| BasinvizError::InvalidParameter {
            param: dim.to_string(),
            message: "at least two finite coordinates are needed to size overlay cells"
                .to_string(),
        };
        let (south, north) = edge_extent(ys).ok_or_else(|| too_short(y_dim))?;
        let (west, east) = edge_extent(xs).ok_or_else(|| too_short(x_dim))?;

        Ok(OverlayBounds {
            south,
            west,
            north,
            east,
        })
    }

    /// Parse a grid from its JSON file representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: GridFile = serde_json::from_str(json)?;
        file.try_into()
    }

    /// Load a grid from a JSON file
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// The row and column axes must be two different dimensions
pub(crate) fn check_distinct_dims(y_dim: &str, x_dim: &str) -> Result<()> {
    if y_dim == x_dim {
        return Err(BasinvizError::InvalidParameter {
            param: "x_dim".to_string(),
            message: format!("row and column dimensions must differ, both are '{}'", x_dim),
        });
    }
    Ok(())
}

/// Outer cell edges of an axis from its pixel-center coordinates.
///
/// Each end is widened by half of its own neighbouring step, so uneven
/// spacing only affects the edge cells. `None` with fewer than two finite
/// centers, since a lone center has no cell width.
fn edge_extent(centers: &[f64]) -> Option<(f64, f64)> {
    let mut sorted: Vec<f64> = centers.iter().copied().filter(|c| c.is_finite()).collect();
    if sorted.len() < 2 {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let lower = sorted[0] - (sorted[1] - sorted[0]) / 2.0;
    let upper = sorted[n - 1] + (sorted[n - 1] - sorted[n - 2]) / 2.0;
    Some((lower, upper))
}

/// Where an overlay image sits on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl OverlayBounds {
    /// `[[south, west], [north, east]]`, the corner order web map overlays take
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// On-disk JSON representation of a grid. `null` cells are missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFile {
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    pub data: Vec<Option<f64>>,
    #[serde(default)]
    pub coords: BTreeMap<String, Vec<f64>>,
}

impl TryFrom<GridFile> for LabeledGrid {
    type Error = BasinvizError;

    fn try_from(file: GridFile) -> Result<Self> {
        let values: Vec<f64> = file
            .data
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let data = ArrayD::from_shape_vec(IxDyn(&file.shape), values)
            .map_err(|e| BasinvizError::invalid_shape(e.to_string()))?;

        let mut grid = LabeledGrid::new(file.dims, data)?;
        for (dim, values) in file.coords {
            grid = grid.with_coords(&dim, values)?;
        }
        Ok(grid)
    }
}
