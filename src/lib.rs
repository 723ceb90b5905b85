//! HVS Network Mapper library.
//!
//! Maps Heavy Vehicle Service road geometries onto OpenStreetMap nodes using
//! an OSRM server and writes the matches to CSV.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env / TOML / CLI ──▶ config ──▶ pipeline
//!                                      │
//!        ┌─────────────────────────────┼───────────────────────────┐
//!        ▼                             ▼                           ▼
//!   ┌─────────┐   features   ┌──────────────┐   polyline   ┌──────────────┐
//!   │ source  │─────────────▶│   geometry   │─────────────▶│     osrm     │──▶ OSRM server
//!   │URL/file │              │stitch/encode │              │ 429 retries  │
//!   └─────────┘              └──────────────┘              └──────┬───────┘
//!                                                                  │ records
//!                                                                  ▼
//!                                                           ┌──────────────┐
//!                                                           │    export    │──▶ CSV
//!                                                           └──────────────┘
//!
//!   Cross-cutting: observability (tracing, progress), resilience (backoff),
//!                  lifecycle (Ctrl+C stop)
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod lifecycle;
pub mod observability;
pub mod osrm;
pub mod pipeline;
pub mod resilience;
pub mod source;

pub use config::MapperConfig;
pub use error::MapperError;
pub use lifecycle::Shutdown;
pub use pipeline::{MatchRecord, Pipeline, RunReport};
