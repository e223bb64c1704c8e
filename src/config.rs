//! Configuration management for basinviz.
//!
//! Settings are layered with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! Each raster layer gets its own typed [`LayerConfig`], checked when the
//! configuration is loaded rather than when a layer is first drawn.

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BasinvizError, Result};
use crate::geometry::{CrossingSelector, DEFAULT_NAME_PROPERTY};
use crate::raster::{ColorizeOptions, DEFAULT_COLORBAR_HEIGHT, DEFAULT_COLORBAR_WIDTH};

/// Command-line arguments for basinviz
#[derive(Parser, Debug)]
#[command(name = "basinviz")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "BASINVIZ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BASINVIZ_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find where rivers cross the combined basin boundary
    Crossings(CrossingsArgs),
    /// Render a grid as a transparent PNG overlay
    Colorize(ColorizeArgs),
    /// Render the colorbar strip for a layer
    Colorbar(ColorbarArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CrossingsArgs {
    /// GeoJSON file of river lines
    pub rivers: PathBuf,

    /// GeoJSON file of basin polygons
    pub basins: PathBuf,

    /// Which crossing to keep per river (east, west, north, south)
    #[arg(short, long)]
    pub select: Option<CrossingSelector>,

    /// Feature property holding the river name
    #[arg(long)]
    pub name_property: Option<String>,

    /// Write GeoJSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the table as an Arrow IPC stream
    #[arg(long)]
    pub arrow: Option<PathBuf>,
}

/// Styling flags shared by `colorize` and `colorbar`
#[derive(ClapArgs, Debug, Default)]
pub struct StyleArgs {
    /// Named layer from the config file to take styling from
    #[arg(long)]
    pub layer: Option<String>,

    /// Colormap name
    #[arg(long)]
    pub colormap: Option<String>,

    /// Value mapped to the low end of the colormap
    #[arg(long, allow_negative_numbers = true)]
    pub vmin: Option<f64>,

    /// Value mapped to the high end of the colormap
    #[arg(long, allow_negative_numbers = true)]
    pub vmax: Option<f64>,

    /// Use a logarithmic scale
    #[arg(long)]
    pub log: bool,

    /// Opacity of drawn cells, 0 to 1
    #[arg(long)]
    pub opacity: Option<f64>,
}

#[derive(ClapArgs, Debug)]
pub struct ColorizeArgs {
    /// JSON grid file
    pub grid: PathBuf,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Resolve an extra dimension by index, as `dim=index` (repeatable)
    #[arg(long = "select", value_name = "DIM=INDEX")]
    pub selections: Vec<String>,

    /// Resolve an extra dimension by nearest coordinate, as `dim=value` (repeatable)
    #[arg(long = "nearest", value_name = "DIM=VALUE")]
    pub nearest: Vec<String>,

    /// Name of the row axis, if not `y`
    #[arg(long)]
    pub y_dim: Option<String>,

    /// Name of the column axis, if not `x`
    #[arg(long)]
    pub x_dim: Option<String>,

    /// Print `{"image": ..., "bounds": ...}` instead of the bare data URI
    #[arg(long)]
    pub json: bool,

    /// Write the PNG here instead of printing a data URI
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ColorbarArgs {
    #[command(flatten)]
    pub style: StyleArgs,

    /// Width in pixels
    #[arg(long, default_value_t = DEFAULT_COLORBAR_WIDTH)]
    pub width: u32,

    /// Height in pixels
    #[arg(long, default_value_t = DEFAULT_COLORBAR_HEIGHT)]
    pub height: u32,

    /// Write the PNG here instead of printing a data URI
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Styling and labelling for one raster dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Identifier used to pick the layer
    pub name: String,

    /// Human-readable label, e.g. for a colorbar caption
    #[serde(default)]
    pub label: Option<String>,

    /// Colormap, range, scale and opacity
    #[serde(flatten)]
    pub style: ColorizeOptions,
}

impl LayerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(BasinvizError::Config {
                message: "Layer name cannot be empty".to_string(),
            });
        }
        self.style.validate().map_err(|e| BasinvizError::Config {
            message: format!("Layer '{}': {}", self.name, e),
        })
    }
}

/// Crossing search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossingConfig {
    /// Feature property holding the river name
    #[serde(default = "default_name_property")]
    pub name_property: String,

    /// Which crossing to keep per river
    #[serde(default)]
    pub selector: CrossingSelector,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Raster layer definitions
    #[serde(default)]
    pub layers: Vec<LayerConfig>,

    /// Crossing search configuration
    #[serde(default)]
    pub crossings: CrossingConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from the file named in `args` and apply overrides
    pub fn load(args: &Args) -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let file_config = Self::load_from_file(config_path)?;
            config.merge(file_config);
        }

        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        for layer in other.layers {
            match self.layers.iter_mut().find(|l| l.name == layer.name) {
                Some(existing) => *existing = layer,
                None => self.layers.push(layer),
            }
        }
        self.crossings = other.crossings;
        self.log_level = other.log_level;
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &str) -> Result<&LayerConfig> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| BasinvizError::Config {
                message: format!("No layer named '{}' in the configuration", name),
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(BasinvizError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.crossings.name_property.is_empty() {
            return Err(BasinvizError::Config {
                message: "crossings.name_property cannot be empty".to_string(),
            });
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if self.layers[..i].iter().any(|l| l.name == layer.name) {
                return Err(BasinvizError::Config {
                    message: format!("Duplicate layer name: {}", layer.name),
                });
            }
            layer.validate()?;
        }

        Ok(())
    }
}

impl StyleArgs {
    /// Styling from the named layer (if any) overridden by explicit flags
    pub fn resolve(&self, config: &Config) -> Result<ColorizeOptions> {
        let mut style = match &self.layer {
            Some(name) => Some(config.layer(name)?.style.clone()),
            None => None,
        };

        if let Some(style) = style.as_mut() {
            if let Some(colormap) = &self.colormap {
                style.colormap = colormap.clone();
            }
            if let Some(vmin) = self.vmin {
                style.value_min = vmin;
            }
            if let Some(vmax) = self.vmax {
                style.value_max = vmax;
            }
        }

        let mut style = match style {
            Some(style) => style,
            None => {
                let missing = |flag: &str| BasinvizError::Config {
                    message: format!("--{} is required when no --layer is given", flag),
                };
                let colormap = self.colormap.as_deref().ok_or_else(|| missing("colormap"))?;
                let vmin = self.vmin.ok_or_else(|| missing("vmin"))?;
                let vmax = self.vmax.ok_or_else(|| missing("vmax"))?;
                ColorizeOptions::new(colormap, vmin, vmax)
            }
        };

        if self.log {
            style.log_scale = true;
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity;
        }

        style.validate()?;
        Ok(style)
    }
}

/// Split a `dim=value` command-line pair
pub fn parse_dim_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .filter(|(dim, value)| !dim.is_empty() && !value.is_empty())
        .ok_or_else(|| BasinvizError::InvalidParameter {
            param: "select".to_string(),
            message: format!("expected DIM=VALUE, got '{}'", pair),
        })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            crossings: CrossingConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            name_property: default_name_property(),
            selector: CrossingSelector::default(),
        }
    }
}

// Default value functions for serde
fn default_name_property() -> String {
    DEFAULT_NAME_PROPERTY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
