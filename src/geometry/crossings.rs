//! Where rivers cross a basin boundary.
//!
//! Every river segment is intersected with every boundary segment. A river
//! that never touches the boundary produces nothing; a river that touches it
//! several times is reduced to one point by a [`CrossingSelector`].

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{BoundingRect, Coord, Intersects, Line, MultiLineString, Point, Rect};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::boundary::basin_boundary;
use super::features::{FeatureLayer, LineFeature, PolygonFeature};
use super::table::CrossingTable;
use crate::error::BasinvizError;
use crate::logging::log_crossing_stats;

/// Which crossing to keep when a river meets the boundary more than once.
///
/// The default keeps the easternmost point, which is where rivers leave a
/// basin draining east. Study areas with another outlet direction pick the
/// matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingSelector {
    /// Largest x
    #[default]
    Easternmost,
    /// Smallest x
    Westernmost,
    /// Largest y
    Northernmost,
    /// Smallest y
    Southernmost,
}

impl CrossingSelector {
    /// Whether `candidate` strictly beats `current`. Ties keep `current`.
    pub fn prefers(&self, candidate: Coord<f64>, current: Coord<f64>) -> bool {
        match self {
            CrossingSelector::Easternmost => candidate.x > current.x,
            CrossingSelector::Westernmost => candidate.x < current.x,
            CrossingSelector::Northernmost => candidate.y > current.y,
            CrossingSelector::Southernmost => candidate.y < current.y,
        }
    }

    /// Pick one point, or `None` when there are no points
    pub fn select(&self, points: &[Coord<f64>]) -> Option<Coord<f64>> {
        points.iter().copied().fold(None, |best, candidate| match best {
            Some(current) if !self.prefers(candidate, current) => Some(current),
            _ => Some(candidate),
        })
    }
}

impl FromStr for CrossingSelector {
    type Err = BasinvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "east" | "easternmost" => Ok(CrossingSelector::Easternmost),
            "west" | "westernmost" => Ok(CrossingSelector::Westernmost),
            "north" | "northernmost" => Ok(CrossingSelector::Northernmost),
            "south" | "southernmost" => Ok(CrossingSelector::Southernmost),
            _ => Err(BasinvizError::InvalidParameter {
                param: "select".to_string(),
                message: format!(
                    "Unknown crossing selector: {}. Must be one of: east, west, north, south",
                    s
                ),
            }),
        }
    }
}

/// One river's selected boundary crossing
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub river_name: String,
    pub point: Point<f64>,
}

/// Boundary segments with their bounding boxes, built once per search
struct SegmentIndex {
    segments: Vec<(Line<f64>, Rect<f64>)>,
}

impl SegmentIndex {
    fn new(boundary: &MultiLineString<f64>) -> Self {
        let segments = boundary
            .iter()
            .flat_map(|ring| ring.lines())
            .map(|line| (line, line.bounding_rect()))
            .collect();
        Self { segments }
    }

    fn len(&self) -> usize {
        self.segments.len()
    }

    /// All points where `line` touches a boundary segment, in line order.
    ///
    /// `None` when a segment of `line` runs along the boundary: the overlap
    /// is a stretch of shared edge, not a crossing point.
    fn intersections(&self, line: &MultiLineString<f64>) -> Option<Vec<Coord<f64>>> {
        let mut points = Vec::new();
        for segment in line.iter().flat_map(|part| part.lines()) {
            let segment_rect = segment.bounding_rect();
            for (edge, edge_rect) in &self.segments {
                if !segment_rect.intersects(edge_rect) {
                    continue;
                }
                match line_intersection(segment, *edge) {
                    Some(LineIntersection::SinglePoint { intersection, .. }) => {
                        points.push(intersection)
                    }
                    Some(LineIntersection::Collinear { .. }) => return None,
                    None => {}
                }
            }
        }
        Some(points)
    }
}

/// All points where `line` meets `boundary`, or `None` if part of `line`
/// runs along `boundary`
pub fn crossing_points(
    line: &MultiLineString<f64>,
    boundary: &MultiLineString<f64>,
) -> Option<Vec<Coord<f64>>> {
    SegmentIndex::new(boundary).intersections(line)
}

/// Easternmost boundary crossing of each line, in input order.
///
/// Lines that never meet the boundary are left out, and so are lines with a
/// stretch running along it. `lines` and `basin_boundary` must share a
/// coordinate reference system; this is not checked.
pub fn find_crossings(lines: &[LineFeature], basin_boundary: &MultiLineString<f64>) -> Vec<Crossing> {
    find_crossings_with(lines, basin_boundary, CrossingSelector::default())
}

/// Boundary crossing of each line chosen by `selector`, in input order
pub fn find_crossings_with(
    lines: &[LineFeature],
    basin_boundary: &MultiLineString<f64>,
    selector: CrossingSelector,
) -> Vec<Crossing> {
    let index = SegmentIndex::new(basin_boundary);

    let crossings: Vec<Crossing> = lines
        .iter()
        .filter_map(|line| {
            let Some(points) = index.intersections(&line.geometry) else {
                debug!(river = %line.name, "Skipping river that runs along the boundary");
                return None;
            };
            let chosen = selector.select(&points)?;
            debug!(
                river = %line.name,
                candidates = points.len(),
                x = chosen.x,
                y = chosen.y,
                "Selected boundary crossing"
            );
            Some(Crossing {
                river_name: line.name.clone(),
                point: Point::from(chosen),
            })
        })
        .collect();

    log_crossing_stats(lines.len(), index.len(), crossings.len());
    crossings
}

/// Build the basin boundary and find where each river leaves it.
///
/// The result carries the rivers' CRS unchanged.
pub fn find_basin_exits(
    rivers: &FeatureLayer<LineFeature>,
    basins: &[PolygonFeature],
    selector: CrossingSelector,
) -> CrossingTable {
    let boundary = basin_boundary(basins);
    let crossings = find_crossings_with(&rivers.features, &boundary, selector);
    CrossingTable::new(crossings, rivers.crs.clone())
}
