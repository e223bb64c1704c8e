//! River and basin geometry: boundary construction and crossing search.

pub mod boundary;
pub mod crossings;
pub mod features;
pub mod table;

pub use boundary::{basin_boundary, rings_of, union_polygons};
pub use crossings::{
    crossing_points, find_basin_exits, find_crossings, find_crossings_with, Crossing,
    CrossingSelector,
};
pub use features::{
    crs_name, load_basins, load_rivers, named_crs, parse_basins, parse_collection, parse_rivers,
    FeatureLayer, LineFeature, PolygonFeature, CRS_MEMBER, DEFAULT_NAME_PROPERTY,
};
pub use table::CrossingTable;
