//! Mapping pipeline.
//!
//! # Data Flow
//! ```text
//! Source::acquire → take_features(limit)
//!     → for each feature, in order:
//!         RoadFeature::from_geojson
//!         → Normalizer::normalize → encode_line
//!         → OsrmClient::match_polyline
//!         → MatchRecord | SkippedFeature
//!     → export::write_csv(records)
//! ```

pub mod runner;
pub mod types;

pub use runner::Pipeline;
pub use types::{MatchRecord, RunReport, SkipReason, SkippedFeature};
