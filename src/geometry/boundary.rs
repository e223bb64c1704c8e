//! Combined basin boundaries.

use geo::{BooleanOps, LineString, MultiLineString, MultiPolygon};
use tracing::debug;

use super::features::PolygonFeature;

/// Union of all basin polygons. Edges shared by adjacent basins disappear.
pub fn union_polygons(polygons: &[PolygonFeature]) -> MultiPolygon<f64> {
    let Some((first, rest)) = polygons.split_first() else {
        return MultiPolygon::new(Vec::new());
    };

    rest.iter()
        .fold(first.geometry.clone(), |acc, p| acc.union(&p.geometry))
}

/// Every ring of a multipolygon, exteriors and holes alike
pub fn rings_of(region: &MultiPolygon<f64>) -> MultiLineString<f64> {
    let rings: Vec<LineString<f64>> = region
        .iter()
        .flat_map(|polygon| {
            std::iter::once(polygon.exterior().clone()).chain(polygon.interiors().iter().cloned())
        })
        .collect();
    MultiLineString::new(rings)
}

/// Boundary curve of the union of `polygons`.
pub fn basin_boundary(polygons: &[PolygonFeature]) -> MultiLineString<f64> {
    let union = union_polygons(polygons);
    let boundary = rings_of(&union);
    debug!(
        basins = polygons.len(),
        union_parts = union.0.len(),
        rings = boundary.0.len(),
        "Built basin boundary"
    );
    boundary
}
