//! OSRM route service response types and match errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for a single feature's OSRM call. All of them drop the feature.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("HTTP error code {0}")]
    Status(u16),

    #[error("still rate limited after {0} retries")]
    RateLimited(u32),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed OSRM response: {0}")]
    Malformed(String),

    #[error("no route at index {index} ({available} returned)")]
    NoRoute { index: usize, available: usize },

    #[error("OSRM server URL cannot take path segments: {0}")]
    BaseUrl(String),
}

/// Body of `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub geometry: RouteGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    pub annotation: Option<Annotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub nodes: Vec<u64>,
}

/// `geometries=geojson` line, lon/lat pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

/// The parts of one route kept for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRoute {
    /// OSM node IDs, one list per leg.
    pub node_list: Vec<Vec<u64>>,
    /// Route geometry as lon/lat pairs.
    pub coord_list: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Take route `index`, flattening its legs' node annotations.
    pub fn select(mut self, index: usize) -> Result<MatchedRoute, MatchError> {
        let available = self.routes.len();
        if index >= available {
            return Err(MatchError::NoRoute { index, available });
        }
        let route = self.routes.swap_remove(index);

        let node_list = route
            .legs
            .into_iter()
            .enumerate()
            .map(|(i, leg)| {
                leg.annotation
                    .map(|a| a.nodes)
                    .ok_or_else(|| MatchError::Malformed(format!("leg {i} has no annotation")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MatchedRoute {
            node_list,
            coord_list: route.geometry.coordinates,
        })
    }
}
