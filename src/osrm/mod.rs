//! OSRM map-matching subsystem.
//!
//! # Data Flow
//! ```text
//! encoded polyline
//!     → client.rs (GET route/v1/{profile}/polyline(..))
//!         429  → resilience::retries (wait, retry)
//!         200  → types.rs (select route, collect leg nodes + coordinates)
//!         else → MatchError::Status
//! ```

pub mod client;
pub mod types;

pub use client::{Matched, OsrmClient, ROUTE_QUERY};
pub use types::{MatchError, MatchedRoute, RouteResponse};
