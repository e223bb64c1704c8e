//! River and basin features, read from GeoJSON feature collections.
//!
//! Parsing and geometry conversion go through the `geojson` crate. The legacy
//! named `crs` member, which GeoJSON dropped but NHD and shapefile exports
//! still write, is read from the collection's foreign members.

use geo::{LineString, MultiLineString, MultiPolygon, Polygon};
use geojson::{FeatureCollection, GeoJson, JsonObject, Value as GeoJsonValue};
use serde_json::{json, Value as JsonValue};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{BasinvizError, Result};

/// Property holding river names in NHD flowline exports
pub const DEFAULT_NAME_PROPERTY: &str = "GNIS_Name";

/// A named river polyline (possibly in several parts)
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    pub name: String,
    pub geometry: MultiLineString<f64>,
}

impl LineFeature {
    pub fn new(name: impl Into<String>, line: LineString<f64>) -> Self {
        Self {
            name: name.into(),
            geometry: MultiLineString::new(vec![line]),
        }
    }

    pub fn multi(name: impl Into<String>, geometry: MultiLineString<f64>) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }
}

/// A basin region, one or more polygons with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    pub geometry: MultiPolygon<f64>,
}

impl PolygonFeature {
    pub fn new(polygon: Polygon<f64>) -> Self {
        Self {
            geometry: MultiPolygon::new(vec![polygon]),
        }
    }

    pub fn multi(geometry: MultiPolygon<f64>) -> Self {
        Self { geometry }
    }
}

/// Features read from one file, with the CRS the file declared
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayer<T> {
    pub features: Vec<T>,
    pub crs: Option<String>,
}

impl<T> FeatureLayer<T> {
    pub fn new(features: Vec<T>) -> Self {
        Self {
            features,
            crs: None,
        }
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }
}

/// Foreign member holding the legacy named CRS
pub const CRS_MEMBER: &str = "crs";

/// Parse GeoJSON text that must be a `FeatureCollection`
pub fn parse_collection(json: &str) -> Result<FeatureCollection> {
    match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(BasinvizError::Geometry {
            message: "expected a FeatureCollection, got a Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(BasinvizError::Geometry {
            message: "expected a FeatureCollection, got a bare Geometry".to_string(),
        }),
    }
}

/// CRS name from the legacy `{"crs": {"type": "name", "properties": {"name": ...}}}` member
pub fn crs_name(collection: &FeatureCollection) -> Option<&str> {
    collection
        .foreign_members
        .as_ref()?
        .get(CRS_MEMBER)?
        .get("properties")?
        .get("name")?
        .as_str()
}

/// Foreign members declaring `name` as the collection's CRS
pub fn named_crs(name: &str) -> JsonObject {
    let mut members = JsonObject::new();
    members.insert(
        CRS_MEMBER.to_string(),
        json!({"type": "name", "properties": {"name": name}}),
    );
    members
}

fn is_short(position: &[f64]) -> bool {
    position.len() < 2
}

/// Every position must carry at least x and y before geo conversion
fn check_positions(value: &GeoJsonValue) -> Result<()> {
    let short = match value {
        GeoJsonValue::Point(p) => is_short(p),
        GeoJsonValue::MultiPoint(ps) | GeoJsonValue::LineString(ps) => {
            ps.iter().any(|p| is_short(p))
        }
        GeoJsonValue::MultiLineString(lines) | GeoJsonValue::Polygon(lines) => {
            lines.iter().flatten().any(|p| is_short(p))
        }
        GeoJsonValue::MultiPolygon(polygons) => {
            polygons.iter().flatten().flatten().any(|p| is_short(p))
        }
        GeoJsonValue::GeometryCollection(geometries) => {
            return geometries.iter().try_for_each(|g| check_positions(&g.value));
        }
    };

    if short {
        return Err(BasinvizError::Geometry {
            message: "position needs at least 2 values".to_string(),
        });
    }
    Ok(())
}

fn to_geo(geometry: geojson::Geometry) -> Result<geo::Geometry<f64>> {
    check_positions(&geometry.value)?;
    Ok(geo::Geometry::<f64>::try_from(geometry)?)
}

fn kind_of(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "geometry",
    }
}

fn property_as_name(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Read rivers from GeoJSON text, naming each from `name_property`.
///
/// Features without geometry are skipped. Rivers with a missing name get an
/// empty one.
pub fn parse_rivers(json: &str, name_property: &str) -> Result<FeatureLayer<LineFeature>> {
    let collection = parse_collection(json)?;
    let crs = crs_name(&collection).map(str::to_string);
    let mut features = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = property_as_name(feature.property(name_property));
        let Some(geometry) = feature.geometry else {
            warn!(feature = index, name = %name, "Skipping river without geometry");
            continue;
        };
        let geometry = match to_geo(geometry)? {
            geo::Geometry::LineString(line) => MultiLineString::new(vec![line]),
            geo::Geometry::MultiLineString(lines) => lines,
            other => {
                return Err(BasinvizError::Geometry {
                    message: format!(
                        "river feature {} has unsupported geometry {}",
                        index,
                        kind_of(&other)
                    ),
                })
            }
        };
        features.push(LineFeature::multi(name, geometry));
    }

    debug!(rivers = features.len(), crs = ?crs, "Parsed rivers");
    Ok(FeatureLayer { features, crs })
}

/// Read basin polygons from GeoJSON text
pub fn parse_basins(json: &str) -> Result<FeatureLayer<PolygonFeature>> {
    let collection = parse_collection(json)?;
    let crs = crs_name(&collection).map(str::to_string);
    let mut features = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!(feature = index, "Skipping basin without geometry");
            continue;
        };
        let geometry = match to_geo(geometry)? {
            geo::Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
            geo::Geometry::MultiPolygon(polygons) => polygons,
            other => {
                return Err(BasinvizError::Geometry {
                    message: format!(
                        "basin feature {} has unsupported geometry {}",
                        index,
                        kind_of(&other)
                    ),
                })
            }
        };
        features.push(PolygonFeature::multi(geometry));
    }

    debug!(basins = features.len(), crs = ?crs, "Parsed basins");
    Ok(FeatureLayer { features, crs })
}

/// Load rivers from a GeoJSON file
pub fn load_rivers(path: &Path, name_property: &str) -> Result<FeatureLayer<LineFeature>> {
    let content = std::fs::read_to_string(path)?;
    parse_rivers(&content, name_property)
}

/// Load basins from a GeoJSON file
pub fn load_basins(path: &Path) -> Result<FeatureLayer<PolygonFeature>> {
    let content = std::fs::read_to_string(path)?;
    parse_basins(&content)
}
