//! basinviz - raster overlays and river/basin crossings from the command line
//!
//! This is the main entry point for the basinviz application.

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use basinviz::config::{
    parse_dim_pair, Args, ColorbarArgs, ColorizeArgs, Command, CrossingsArgs,
};
use basinviz::geometry::{load_basins, load_rivers};
use basinviz::{
    colorize_with, find_basin_exits, init_tracing, log_error, log_operation_end,
    log_operation_start, render_colorbar, BasinvizError, Config, EncodedImage, LabeledGrid,
};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_tracing(&config.log_level);

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Starting basinviz v{}", env!("CARGO_PKG_VERSION"));

    let operation = match &args.command {
        Command::Crossings(_) => "crossings",
        Command::Colorize(_) => "colorize",
        Command::Colorbar(_) => "colorbar",
    };
    let start = Instant::now();
    log_operation_start(operation, None);

    let result = match &args.command {
        Command::Crossings(cmd) => run_crossings(cmd, &config),
        Command::Colorize(cmd) => run_colorize(cmd, &config),
        Command::Colorbar(cmd) => run_colorbar(cmd, &config),
    };
    log_operation_end(operation, start, result.is_ok());

    if let Err(e) = &result {
        if let Some(e) = e.downcast_ref::<BasinvizError>() {
            log_error(e, "command failed");
        }
    }
    result
}

fn run_crossings(cmd: &CrossingsArgs, config: &Config) -> anyhow::Result<()> {
    let name_property = cmd
        .name_property
        .as_deref()
        .unwrap_or(&config.crossings.name_property);
    let selector = cmd.select.unwrap_or(config.crossings.selector);

    let rivers = load_rivers(&cmd.rivers, name_property)
        .with_context(|| format!("Failed to load rivers from {:?}", cmd.rivers))?;
    let basins = load_basins(&cmd.basins)
        .with_context(|| format!("Failed to load basins from {:?}", cmd.basins))?;

    info!(
        rivers = rivers.features.len(),
        basins = basins.features.len(),
        ?selector,
        "Searching for boundary crossings"
    );

    let table = find_basin_exits(&rivers, &basins.features, selector);
    info!("Found {} crossings", table.len());

    if let Some(path) = &cmd.arrow {
        table
            .write_arrow(path)
            .with_context(|| format!("Failed to write Arrow stream to {:?}", path))?;
    }

    match &cmd.output {
        Some(path) => table
            .write_geojson(path)
            .with_context(|| format!("Failed to write GeoJSON to {:?}", path))?,
        None => println!("{}", table.to_geojson_string()?),
    }
    Ok(())
}

fn run_colorize(cmd: &ColorizeArgs, config: &Config) -> anyhow::Result<()> {
    let mut style = cmd.style.resolve(config)?;
    if cmd.y_dim.is_some() || cmd.x_dim.is_some() {
        let y_dim = cmd.y_dim.clone().unwrap_or_else(|| style.y_dim.clone());
        let x_dim = cmd.x_dim.clone().unwrap_or_else(|| style.x_dim.clone());
        style = style.with_spatial_dims(&y_dim, &x_dim);
    }

    let mut grid = LabeledGrid::load_json(&cmd.grid)
        .with_context(|| format!("Failed to load grid from {:?}", cmd.grid))?;

    for pair in &cmd.selections {
        let (dim, index) = parse_dim_pair(pair)?;
        let index: usize = index
            .parse()
            .with_context(|| format!("Invalid index in --select {}", pair))?;
        grid = grid.select(dim, index)?;
    }
    for pair in &cmd.nearest {
        let (dim, value) = parse_dim_pair(pair)?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("Invalid value in --nearest {}", pair))?;
        grid = grid.select_nearest(dim, value)?;
    }

    let image = colorize_with(&grid, &style)?;

    if cmd.json {
        let bounds = grid.overlay_bounds(&style.y_dim, &style.x_dim).ok();
        let output = json!({
            "image": image.to_data_uri(),
            "bounds": bounds.map(|b| b.corners()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        if let Some(path) = &cmd.output {
            write_image(&image, path)?;
        }
        return Ok(());
    }

    emit_image(&image, cmd.output.as_deref())
}

fn run_colorbar(cmd: &ColorbarArgs, config: &Config) -> anyhow::Result<()> {
    let style = cmd.style.resolve(config)?;
    let image = render_colorbar(&style, cmd.width, cmd.height)?;
    emit_image(&image, cmd.output.as_deref())
}

/// Write the PNG to `output`, or print its data URI
fn emit_image(image: &EncodedImage, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => write_image(image, path),
        None => {
            println!("{}", image.to_data_uri());
            Ok(())
        }
    }
}

fn write_image(image: &EncodedImage, path: &Path) -> anyhow::Result<()> {
    image
        .write_png(path)
        .with_context(|| format!("Failed to write PNG to {:?}", path))?;
    info!("Wrote {}x{} image to {:?}", image.width(), image.height(), path);
    Ok(())
}
