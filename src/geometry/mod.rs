//! Geometry normalization subsystem.
//!
//! # Data Flow
//! ```text
//! RoadGeometry (LineString | MultiLineString)
//!     → normalize.rs (stitch parts, simplify)
//!     → LineString<f64>
//!     → encode.rs (polyline, precision 5)
//!     → String for the OSRM request path
//! ```

pub mod encode;
pub mod normalize;

pub use encode::{encode_line, POLYLINE_PRECISION};
pub use normalize::{GeometryError, Normalizer, Stitching};
