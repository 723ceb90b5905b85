//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mapper.
//! All types derive Serde traits so a TOML file can provide a base layer
//! before environment variables are applied.

use serde::{Deserialize, Serialize};

/// Root configuration for a mapping run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MapperConfig {
    /// Where the HVS GeoJSON comes from.
    pub source: SourceConfig,

    /// OSRM endpoint and query settings.
    pub osrm: OsrmConfig,

    /// MultiLineString merge settings.
    pub geometry: GeometryConfig,

    /// Rate-limit retry settings.
    pub retries: RetryConfig,

    /// HTTP timeout configuration.
    pub timeouts: TimeoutConfig,

    /// CSV output settings.
    pub output: OutputConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Source selection for the feature collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Fetch from `url` instead of reading `path`.
    ///
    /// From the environment, `HVS_USE_URL` enables this for any casing of
    /// `true` (`True`, `TRUE`, ...); every other value reads the file.
    pub use_url: bool,

    /// Remote GeoJSON endpoint (Main Roads / ESRI).
    pub url: Option<String>,

    /// Local GeoJSON file.
    pub path: Option<String>,

    /// Maximum number of features taken from the collection.
    pub feature_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            use_url: false,
            url: None,
            path: None,
            feature_limit: 100,
        }
    }
}

/// OSRM service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server (e.g., "http://localhost:5000/").
    pub server: String,

    /// Routing profile in the request path.
    pub profile: String,

    /// Which returned route to take.
    pub route_index: usize,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:5000/".to_string(),
            profile: "driving".to_string(),
            route_index: 0,
        }
    }
}

/// Geometry normalization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Maximum endpoint gap (degrees) bridged when stitching parts.
    pub snap_tolerance: f64,

    /// Douglas-Peucker epsilon (degrees) applied after stitching.
    pub simplify_epsilon: f64,

    /// Parts whose endpoints both lie within this distance (degrees) of the
    /// stitched line are treated as the opposite carriageway and dropped.
    pub carriageway_width: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 0.1,
            simplify_epsilon: 0.1,
            carriageway_width: 0.001,
        }
    }
}

/// Retry configuration for HTTP 429 responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of rate-limit retries per feature (0 = unlimited).
    pub max_rate_limit_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,

    /// Upper bound on a wait advised by the server through
    /// `X-Rate-Limit-Interval` or `Retry-After`, in seconds.
    pub max_advised_wait_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 0,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            max_advised_wait_secs: 300,
        }
    }
}

/// Timeout configuration for outgoing requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 120,
        }
    }
}

/// CSV output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination CSV path, overwritten on every run.
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: "hvs_osm_nodes.csv".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Draw a progress bar over the feature loop.
    pub progress: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            progress: true,
        }
    }
}
