//! Records produced by a mapping run.

use serde::Serialize;
use thiserror::Error;

use crate::geometry::GeometryError;
use crate::osrm::{MatchError, MatchedRoute};
use crate::source::FeatureError;

/// One successfully matched road.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub id: String,
    pub name: String,
    /// OSM node IDs, one list per route leg.
    pub node_list: Vec<Vec<u64>>,
    /// Matched route geometry as lon/lat pairs.
    pub coord_list: Vec<[f64; 2]>,
}

impl MatchRecord {
    pub fn new(id: String, name: String, route: MatchedRoute) -> Self {
        Self {
            id,
            name,
            node_list: route.node_list,
            coord_list: route.coord_list,
        }
    }
}

/// Why a feature produced no record.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("invalid feature: {0}")]
    InvalidFeature(#[from] FeatureError),

    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Iteration failed with {0}")]
    Match(#[from] MatchError),
}

#[derive(Debug)]
pub struct SkippedFeature {
    /// Road ID when it could be read.
    pub id: Option<String>,
    pub reason: SkipReason,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Features considered after truncation.
    pub considered: usize,
    /// Matched records in processing order.
    pub records: Vec<MatchRecord>,
    pub skipped: Vec<SkippedFeature>,
    /// Set when a stop was requested before every feature was processed.
    pub interrupted: bool,
}

impl RunReport {
    pub fn matched(&self) -> usize {
        self.records.len()
    }
}
