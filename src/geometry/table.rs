//! The crossing table and its export formats.
//!
//! The table has a `river_name` and a point `geometry` per row and carries
//! the CRS of the rivers it was computed from. It is written either as a
//! GeoJSON point collection or as an Arrow IPC stream with `river_name`, `x`
//! and `y` columns and the CRS in the schema metadata.

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use arrow_ipc::writer::StreamWriter;
use arrow_schema::{DataType, Field, Schema};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::crossings::Crossing;
use super::features::named_crs;
use crate::error::Result;

/// Schema metadata key holding the CRS name
pub const CRS_METADATA_KEY: &str = "crs";

/// Ordered crossings, one row per river that met the boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossingTable {
    pub crossings: Vec<Crossing>,
    pub crs: Option<String>,
}

impl CrossingTable {
    pub fn new(crossings: Vec<Crossing>, crs: Option<String>) -> Self {
        Self { crossings, crs }
    }

    pub fn len(&self) -> usize {
        self.crossings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crossing> {
        self.crossings.iter()
    }

    /// Crossing for a river, if it has one
    pub fn get(&self, river_name: &str) -> Option<&Crossing> {
        self.crossings.iter().find(|c| c.river_name == river_name)
    }

    /// GeoJSON point features with a `river_name` property
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .crossings
            .iter()
            .map(|c| {
                let mut properties = JsonObject::new();
                properties.insert(
                    "river_name".to_string(),
                    JsonValue::String(c.river_name.clone()),
                );
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![c.point.x(), c.point.y()]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: self.crs.as_deref().map(named_crs),
        }
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }

    /// Arrow schema of [`to_record_batch`](Self::to_record_batch)
    pub fn schema(&self) -> Schema {
        let fields = vec![
            Field::new("river_name", DataType::Utf8, false),
            Field::new("x", DataType::Float64, false),
            Field::new("y", DataType::Float64, false),
        ];

        let mut metadata = HashMap::new();
        if let Some(crs) = &self.crs {
            metadata.insert(CRS_METADATA_KEY.to_string(), crs.clone());
        }
        Schema::new(fields).with_metadata(metadata)
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let names = StringArray::from_iter_values(self.crossings.iter().map(|c| c.river_name.as_str()));
        let xs = Float64Array::from_iter_values(self.crossings.iter().map(|c| c.point.x()));
        let ys = Float64Array::from_iter_values(self.crossings.iter().map(|c| c.point.y()));

        let columns: Vec<ArrayRef> = vec![Arc::new(names), Arc::new(xs), Arc::new(ys)];
        Ok(RecordBatch::try_new(Arc::new(self.schema()), columns)?)
    }

    /// Serialize to an Arrow IPC stream
    pub fn to_arrow_ipc(&self) -> Result<Vec<u8>> {
        let batch = self.to_record_batch()?;
        let schema = batch.schema();

        let mut output = Vec::new();
        let mut writer = StreamWriter::try_new(&mut output, &schema)?;
        writer.write(&batch)?;
        writer.finish()?;
        drop(writer);

        debug!(rows = batch.num_rows(), bytes = output.len(), "Encoded crossing table");
        Ok(output)
    }

    pub fn write_arrow(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_arrow_ipc()?)?;
        Ok(())
    }
}
