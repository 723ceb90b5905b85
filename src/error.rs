//! Crate-level error type for fatal failures.

use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::osrm::MatchError;
use crate::source::SourceError;

/// Anything that ends a run. Per-feature problems are reported as skips.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("source: {0}")]
    Source(#[from] SourceError),

    #[error("OSRM client: {0}")]
    Osrm(#[from] MatchError),

    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("export: {0}")]
    Export(#[from] ExportError),
}
