//! Feature collection acquisition.
//!
//! # Responsibilities
//! - Pick the remote or local source from configuration
//! - Download or read the GeoJSON document
//! - Parse it into a FeatureCollection
//! - Report whether a CRS override is present

use std::path::PathBuf;

use geojson::{FeatureCollection, GeoJson};
use thiserror::Error;

use crate::config::SourceConfig;

/// Errors that abort acquisition. None of these are recoverable.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no {0} configured for the selected source")]
    MissingLocation(&'static str),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a FeatureCollection, found a {0}")]
    NotACollection(&'static str),
}

/// Where the HVS data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        if config.use_url {
            config
                .url
                .clone()
                .map(Source::Url)
                .ok_or(SourceError::MissingLocation("HVS_URL"))
        } else {
            config
                .path
                .as_ref()
                .map(|p| Source::File(PathBuf::from(p)))
                .ok_or(SourceError::MissingLocation("HVS_PATH"))
        }
    }

    /// Fetch and parse the collection.
    pub async fn acquire(&self, client: &reqwest::Client) -> Result<FeatureCollection, SourceError> {
        let text = match self {
            Source::Url(url) => {
                tracing::info!(url = %url, "Retrieving data from Main Roads / ESRI");
                fetch_text(client, url).await?
            }
            Source::File(path) => {
                tracing::info!(path = %path.display(), "Retrieving data from file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        let collection = parse_collection(&text)?;
        report_crs(&collection);
        Ok(collection)
    }
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let http_err = |source| SourceError::Http {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(http_err)?
        .text()
        .await
        .map_err(http_err)
}

/// Parse a GeoJSON document that must be a FeatureCollection.
pub fn parse_collection(text: &str) -> Result<FeatureCollection, SourceError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(SourceError::NotACollection("Feature")),
        GeoJson::Geometry(_) => Err(SourceError::NotACollection("Geometry")),
    }
}

/// Whether the document root carries a `crs` member.
pub fn has_crs(collection: &FeatureCollection) -> bool {
    collection
        .foreign_members
        .as_ref()
        .is_some_and(|members| members.contains_key("crs"))
}

fn report_crs(collection: &FeatureCollection) {
    if has_crs(collection) {
        tracing::warn!(
            "A CRS has been specified. Ensure it is EPSG:4326 (WGS84) before relying on the output"
        );
    } else {
        tracing::warn!(
            "No CRS specified in the root element. A standards-compliant file is EPSG:4326 (WGS84), \
             but this may not be the case or it may be set per feature"
        );
    }
}
