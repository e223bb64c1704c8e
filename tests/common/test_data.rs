//! Test data generation utilities.
//!
//! Basin and river fixtures on a small planar grid, plus grid and GeoJSON
//! files written into temporary directories for the command-line paths.

#![allow(dead_code)]

use geo::{line_string, polygon, LineString};
use ndarray::{Array2, Array3};
use serde_json::json;
use std::path::{Path, PathBuf};

use basinviz::{LabeledGrid, LineFeature, PolygonFeature};

/// Axis-aligned square basin with its lower-left corner at `(x0, y0)`
pub fn square_basin(x0: f64, y0: f64, size: f64) -> PolygonFeature {
    PolygonFeature::new(polygon![
        (x: x0, y: y0),
        (x: x0 + size, y: y0),
        (x: x0 + size, y: y0 + size),
        (x: x0, y: y0 + size),
    ])
}

/// Two 2x2 basins sharing the edge x = 2
pub fn adjacent_basins() -> Vec<PolygonFeature> {
    vec![square_basin(0.0, 0.0, 2.0), square_basin(2.0, 0.0, 2.0)]
}

pub fn river(name: &str, line: LineString<f64>) -> LineFeature {
    LineFeature::new(name, line)
}

/// A line that meets [`zigzag_basins`] at x = 2.0, then 5.0, then -1.0
pub fn zigzag_river() -> LineFeature {
    river(
        "Zigzag Creek",
        line_string![
            (x: 1.0, y: 1.0),
            (x: 3.0, y: 1.0),
            (x: 6.0, y: 1.0),
            (x: 6.0, y: 3.0),
            (x: -2.0, y: 3.0),
        ],
    )
}

/// Two disjoint boxes: `[0, 2] x [0, 2]` and `[-1, 5] x [2.5, 3.5]`
pub fn zigzag_basins() -> Vec<PolygonFeature> {
    vec![
        // Lower box: the river leaves it eastward through x = 2
        PolygonFeature::new(polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ]),
        // Upper box: the river's return leg crosses x = 5 and x = -1
        PolygonFeature::new(polygon![
            (x: -1.0, y: 2.5),
            (x: 5.0, y: 2.5),
            (x: 5.0, y: 3.5),
            (x: -1.0, y: 3.5),
        ]),
    ]
}

/// `rows x cols` grid rising linearly from 0 at the top-left cell
pub fn ramp_grid(rows: usize, cols: usize) -> LabeledGrid {
    let data = Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as f64);
    LabeledGrid::from_array2(data)
}

/// Grid where every cell is missing
pub fn nan_grid(rows: usize, cols: usize) -> LabeledGrid {
    LabeledGrid::from_array2(Array2::from_elem((rows, cols), f64::NAN))
}

/// `(threshold, y, x)` flood-probability style grid with coordinates
pub fn threshold_grid() -> LabeledGrid {
    let data = Array3::from_shape_fn((3, 2, 4), |(t, y, x)| {
        (x as f64 + y as f64) / 4.0 * (1.0 - t as f64 * 0.25)
    });
    LabeledGrid::new(vec!["threshold", "y", "x"], data.into_dyn())
        .unwrap()
        .with_coords("threshold", vec![0.5, 1.0, 2.0])
        .unwrap()
        .with_coords("y", vec![45.0, 44.0])
        .unwrap()
        .with_coords("x", vec![-117.0, -116.0, -115.0, -114.0])
        .unwrap()
}

/// GeoJSON text for a river collection, one LineString per `(name, coords)`
pub fn rivers_geojson(rivers: &[(&str, Vec<[f64; 2]>)], crs: Option<&str>) -> String {
    let features: Vec<_> = rivers
        .iter()
        .map(|(name, coords)| {
            json!({
                "type": "Feature",
                "properties": {"GNIS_Name": name},
                "geometry": {"type": "LineString", "coordinates": coords},
            })
        })
        .collect();

    let mut collection = json!({"type": "FeatureCollection", "features": features});
    if let Some(crs) = crs {
        collection["crs"] = json!({"type": "name", "properties": {"name": crs}});
    }
    collection.to_string()
}

/// GeoJSON text for a basin collection of axis-aligned boxes `[x0, y0, x1, y1]`
pub fn basins_geojson(boxes: &[[f64; 4]]) -> String {
    let features: Vec<_> = boxes
        .iter()
        .map(|[x0, y0, x1, y1]| {
            json!({
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]],
                },
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features}).to_string()
}

/// Write `content` to `name` inside `dir` and return the path
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
