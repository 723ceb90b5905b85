//! HVS data acquisition subsystem.
//!
//! # Data Flow
//! ```text
//! SourceConfig (use_url, url, path)
//!     → fetch.rs (HTTP GET or file read, parse, CRS note)
//!     → truncate to feature_limit
//!     → feature.rs (ROAD, ROAD_NAME, LineString/MultiLineString)
//! ```

pub mod feature;
pub mod fetch;

pub use feature::{road_id_hint, FeatureError, RoadFeature, RoadGeometry};
pub use fetch::{has_crs, parse_collection, Source, SourceError};

use geojson::{Feature, FeatureCollection};

/// Keep only the first `limit` features of a collection.
pub fn take_features(collection: FeatureCollection, limit: usize) -> Vec<Feature> {
    let total = collection.features.len();
    let features: Vec<Feature> = collection.features.into_iter().take(limit).collect();
    if features.len() < total {
        tracing::info!(total, kept = features.len(), "Truncated feature list");
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_limit() {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![Feature::default(); 250],
            foreign_members: None,
        };
        assert_eq!(take_features(collection.clone(), 100).len(), 100);
        assert_eq!(take_features(collection, 500).len(), 250);
    }
}
