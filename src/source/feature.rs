//! Road features extracted from the HVS collection.

use geo::{Coord, LineString, MultiLineString};
use geojson::{Feature, JsonObject, Value};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Property holding the road identifier.
pub const ROAD_ID_PROPERTY: &str = "ROAD";

/// Property holding the road name.
pub const ROAD_NAME_PROPERTY: &str = "ROAD_NAME";

/// Geometry of a single road, in WGS84 lon/lat.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadGeometry {
    Line(LineString<f64>),
    MultiLine(MultiLineString<f64>),
}

/// One road segment from the source dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFeature {
    pub id: String,
    pub name: String,
    pub geometry: RoadGeometry,
}

/// Reasons a GeoJSON feature cannot be turned into a [`RoadFeature`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("missing property {0}")]
    MissingProperty(&'static str),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unsupported geometry type {0}")]
    UnsupportedGeometry(&'static str),

    #[error("position with fewer than two ordinates")]
    ShortPosition,
}

impl RoadFeature {
    /// Read the road ID, name and geometry out of a GeoJSON feature.
    pub fn from_geojson(feature: &Feature) -> Result<Self, FeatureError> {
        let properties = feature.properties.as_ref();
        let id = property(properties, ROAD_ID_PROPERTY)?;
        let name = property(properties, ROAD_NAME_PROPERTY)?;

        let value = &feature
            .geometry
            .as_ref()
            .ok_or(FeatureError::MissingGeometry)?
            .value;

        let geometry = match value {
            Value::LineString(positions) => RoadGeometry::Line(line(positions)?),
            Value::MultiLineString(lines) => RoadGeometry::MultiLine(MultiLineString::new(
                lines.iter().map(|l| line(l)).collect::<Result<_, _>>()?,
            )),
            other => return Err(FeatureError::UnsupportedGeometry(type_name(other))),
        };

        Ok(Self { id, name, geometry })
    }
}

/// Best-effort road ID for log lines about features that failed to parse.
pub fn road_id_hint(feature: &Feature) -> Option<String> {
    property(feature.properties.as_ref(), ROAD_ID_PROPERTY).ok()
}

fn property(properties: Option<&JsonObject>, key: &'static str) -> Result<String, FeatureError> {
    match properties.and_then(|p| p.get(key)) {
        None | Some(JsonValue::Null) => Err(FeatureError::MissingProperty(key)),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

fn line(positions: &[Vec<f64>]) -> Result<LineString<f64>, FeatureError> {
    positions
        .iter()
        .map(|p| match (p.first(), p.get(1)) {
            (Some(&x), Some(&y)) => Ok(Coord { x, y }),
            _ => Err(FeatureError::ShortPosition),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
