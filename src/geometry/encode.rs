//! Polyline encoding for OSRM requests.

use geo::LineString;

use crate::geometry::normalize::GeometryError;

/// OSRM's `polyline(...)` coordinates use precision 5.
pub const POLYLINE_PRECISION: u32 = 5;

/// Encode a lon/lat line as a Google polyline (lat/lon order on the wire).
pub fn encode_line(line: &LineString<f64>) -> Result<String, GeometryError> {
    polyline::encode_coordinates(line.coords().copied(), POLYLINE_PRECISION)
        .map_err(|e| GeometryError::Encode(e.to_string()))
}
