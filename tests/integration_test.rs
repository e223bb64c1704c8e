//! Integration tests for basinviz
//!
//! These tests drive the public API end to end: GeoJSON in, crossing table
//! out; labeled grid in, data URI out.

mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use geo::line_string;
use pretty_assertions::assert_eq;

use basinviz::colormaps::get_colormap;
use basinviz::config::Config;
use basinviz::geometry::{crs_name, load_basins, load_rivers, parse_collection};
use basinviz::raster::{encode_png, DEFAULT_COLORBAR_WIDTH};
use basinviz::{
    basin_boundary, colorize, colorize_with, find_basin_exits, find_crossings,
    find_crossings_with, render_colorbar, BasinvizError, ColorizeOptions, CrossingSelector,
    LabeledGrid,
};
use common::assertions::{assert_approx_eq, assert_point_approx_eq};
use common::{image_utils, test_data};

#[test]
fn test_contained_line_has_no_crossing() {
    let boundary = basin_boundary(&[test_data::square_basin(0.0, 0.0, 4.0)]);
    let inside = test_data::river("Pond Outlet", line_string![(x: 1.0, y: 1.0), (x: 3.0, y: 3.0)]);
    let leaving = test_data::river("Big Creek", line_string![(x: 2.0, y: 2.0), (x: 6.0, y: 2.0)]);

    let crossings = find_crossings(&[inside, leaving], &boundary);

    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].river_name, "Big Creek");
    assert_point_approx_eq(crossings[0].point, 4.0, 2.0);
}

#[test]
fn test_multiple_crossings_select_easternmost() {
    let boundary = basin_boundary(&test_data::zigzag_basins());
    let crossings = find_crossings(&[test_data::zigzag_river()], &boundary);

    assert_eq!(crossings.len(), 1);
    assert_point_approx_eq(crossings[0].point, 5.0, 3.0);

    let western = find_crossings_with(
        &[test_data::zigzag_river()],
        &boundary,
        CrossingSelector::Westernmost,
    );
    assert_point_approx_eq(western[0].point, -1.0, 3.0);
}

#[test]
fn test_empty_line_set() {
    let boundary = basin_boundary(&[test_data::square_basin(0.0, 0.0, 4.0)]);
    assert!(find_crossings(&[], &boundary).is_empty());
}

#[test]
fn test_shared_edge_is_not_a_crossing() {
    let boundary = basin_boundary(&test_data::adjacent_basins());
    let across_divide =
        test_data::river("Divide Creek", line_string![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0)]);

    assert!(find_crossings(&[across_divide], &boundary).is_empty());
}

#[test]
fn test_river_along_basin_edge_is_dropped() {
    let boundary = basin_boundary(&[test_data::square_basin(0.0, 0.0, 4.0)]);
    let edge_run = test_data::river(
        "Edge Run",
        line_string![(x: 2.0, y: 2.0), (x: 4.0, y: 2.0), (x: 4.0, y: 3.0), (x: 6.0, y: 3.0)],
    );
    let leaving = test_data::river("Big Creek", line_string![(x: 2.0, y: 1.0), (x: 6.0, y: 1.0)]);

    let crossings = find_crossings(&[edge_run, leaving], &boundary);

    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].river_name, "Big Creek");
}

#[test]
fn test_crossings_from_geojson_files() {
    let dir = tempfile::tempdir().unwrap();
    let rivers_path = test_data::write_fixture(
        dir.path(),
        "rivers.geojson",
        &test_data::rivers_geojson(
            &[
                ("Lochsa River", vec![[1.0, 1.0], [5.0, 1.0]]),
                ("Still Water", vec![[0.5, 0.5], [1.5, 1.5]]),
                ("Selway River", vec![[3.0, 3.0], [3.0, 6.0]]),
            ],
            Some("EPSG:26911"),
        ),
    );
    let basins_path = test_data::write_fixture(
        dir.path(),
        "basins.geojson",
        &test_data::basins_geojson(&[[0.0, 0.0, 2.0, 4.0], [2.0, 0.0, 4.0, 4.0]]),
    );

    let config = Config::default();
    let rivers = load_rivers(&rivers_path, &config.crossings.name_property).unwrap();
    let basins = load_basins(&basins_path).unwrap();
    let table = find_basin_exits(&rivers, &basins.features, config.crossings.selector);

    assert_eq!(table.crs.as_deref(), Some("EPSG:26911"));
    assert_eq!(table.len(), 2);
    assert_point_approx_eq(table.get("Lochsa River").unwrap().point, 4.0, 1.0);
    assert_point_approx_eq(table.get("Selway River").unwrap().point, 3.0, 4.0);
    assert!(table.get("Still Water").is_none());

    let out = dir.path().join("crossings.geojson");
    table.write_geojson(&out).unwrap();
    let written = parse_collection(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(crs_name(&written), Some("EPSG:26911"));
    assert_eq!(written, table.to_geojson());
}

#[test]
fn test_log_scale_zero_min_fails_before_reading_grid() {
    // This grid could never be colorized as-is; the range error must win.
    let unsliced = test_data::threshold_grid();

    let err = colorize(&unsliced, "viridis", 0.0, 1.0, true).unwrap_err();
    assert!(matches!(err, BasinvizError::InvalidRange { .. }));
}

#[test]
fn test_all_missing_grid_is_transparent() {
    let grid = test_data::nan_grid(3, 5);

    for (cmap, vmin, vmax, log) in [
        ("viridis", 0.0, 1.0, false),
        ("RdBu_r", -10.0, 10.0, false),
        ("Greens", 0.01, 100.0, true),
    ] {
        let image = colorize(&grid, cmap, vmin, vmax, log).unwrap();
        let img = image_utils::rgba_from_uri(&image.to_data_uri());
        image_utils::assert_image_dimensions(&img, 5, 3);
        assert!(image_utils::is_fully_transparent(&img), "{} left opaque pixels", cmap);
    }
}

#[test]
fn test_colorize_is_idempotent_and_non_mutating() {
    let grid = test_data::ramp_grid(4, 6);
    let before = grid.clone();

    let first = colorize(&grid, "magma", 0.0, 23.0, false).unwrap().to_data_uri();
    let second = colorize(&grid, "magma", 0.0, 23.0, false).unwrap().to_data_uri();

    assert_eq!(first, second);
    assert_eq!(grid, before);
}

#[test]
fn test_payload_round_trip() {
    let grid = test_data::ramp_grid(5, 7);
    let uri = colorize(&grid, "coolwarm", 0.0, 34.0, false).unwrap().to_data_uri();

    let decoded = image_utils::rgba_from_uri(&uri);
    let reencoded = STANDARD.encode(encode_png(&decoded).unwrap());

    assert_eq!(uri.strip_prefix("data:image/png;base64,").unwrap(), reencoded);
}

#[test]
fn test_midpoint_value_gets_midpoint_color() {
    let grid = LabeledGrid::from_array2(ndarray::array![[5.0]]);
    let uri = colorize(&grid, "viridis", 0.0, 10.0, false).unwrap().to_data_uri();

    let img = image_utils::rgba_from_uri(&uri);
    let expected = get_colormap("viridis").unwrap().map_normalized(0.5);

    assert_eq!(img.get_pixel(0, 0).0, expected);
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
}

#[test]
fn test_log_scale_masks_non_positive_cells() {
    let grid = LabeledGrid::from_array2(ndarray::array![[-1.0, 0.0, 1.0, 100.0]]);
    let image = colorize(&grid, "Blues", 0.1, 100.0, true).unwrap();
    let img = image.decode_rgba().unwrap();

    assert_eq!(image_utils::alpha_channel(&img), vec![0, 0, 255, 255]);
    assert_eq!(
        img.get_pixel(3, 0).0,
        get_colormap("Blues").unwrap().map_normalized(1.0)
    );
}

#[test]
fn test_select_then_colorize_with_bounds() {
    let grid = test_data::threshold_grid();
    let options = ColorizeOptions::new("Blues", 0.0, 1.0).with_opacity(0.5);

    assert!(matches!(
        colorize_with(&grid, &options),
        Err(BasinvizError::InvalidShape { .. })
    ));

    let slice = grid.select_nearest("threshold", 1.1).unwrap();
    assert_eq!(slice, grid.select("threshold", 1).unwrap());

    let img = colorize_with(&slice, &options).unwrap().decode_rgba().unwrap();
    image_utils::assert_image_dimensions(&img, 4, 2);
    assert!(image_utils::alpha_channel(&img).iter().all(|a| *a == 127));

    let bounds = slice.overlay_bounds("y", "x").unwrap();
    assert_approx_eq(bounds.south, 43.5, None);
    assert_approx_eq(bounds.north, 45.5, None);
    assert_approx_eq(bounds.west, -117.5, None);
    assert_approx_eq(bounds.east, -113.5, None);
}

#[test]
fn test_reversed_colormap_mirrors() {
    let forward = get_colormap("RdBu").unwrap();
    let reversed = get_colormap("RdBu_r").unwrap();

    for t in [0.0, 0.2, 0.5, 0.9, 1.0] {
        assert_eq!(reversed.rgba(t), forward.rgba(1.0 - t));
    }
}

#[test]
fn test_colorbar_top_row_is_end_color() {
    let options = ColorizeOptions::new("plasma", 0.0, 1.0);
    let image = render_colorbar(&options, DEFAULT_COLORBAR_WIDTH, 64).unwrap();
    let img = image.decode_rgba().unwrap();

    let cmap = get_colormap("plasma").unwrap();
    image_utils::assert_image_dimensions(&img, DEFAULT_COLORBAR_WIDTH, 64);
    assert_eq!(img.get_pixel(0, 0).0, cmap.map_normalized(1.0));
    assert_eq!(img.get_pixel(DEFAULT_COLORBAR_WIDTH - 1, 63).0, cmap.map_normalized(0.0));
}

#[test]
fn test_layer_config_rejects_bad_layers() {
    let bad_colormap = r#"{"layers": [{"name": "a", "colormap": "rainbow-ish", "value_min": 0, "value_max": 1}]}"#;
    let bad_range = r#"{"layers": [{"name": "a", "colormap": "viridis", "value_min": 1, "value_max": 1}]}"#;

    for json in [bad_colormap, bad_range] {
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }
}
