//! Sequential fetch → normalize → match → export run.
//!
//! # Responsibilities
//! - Acquire and truncate the feature collection
//! - Process features one at a time, in order
//! - Turn per-feature failures into skip entries instead of aborting
//! - Write the CSV once at the end, including after an interrupt

use std::path::Path;
use std::time::Duration;

use geojson::Feature;

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::export::write_csv;
use crate::geometry::{encode_line, Normalizer};
use crate::lifecycle::Shutdown;
use crate::observability::feature_progress;
use crate::osrm::OsrmClient;
use crate::pipeline::types::{MatchRecord, RunReport, SkipReason, SkippedFeature};
use crate::source::{road_id_hint, take_features, RoadFeature, Source};

pub struct Pipeline {
    config: MapperConfig,
    client: reqwest::Client,
    osrm: OsrmClient,
    normalizer: Normalizer,
    shutdown: Shutdown,
}

impl Pipeline {
    /// Build the HTTP client and stage helpers from a validated config.
    pub fn new(config: MapperConfig) -> Result<Self, MapperError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .user_agent(concat!("hvs-mapper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let osrm = OsrmClient::new(client.clone(), &config.osrm, &config.retries)?;
        let normalizer = Normalizer::from_config(&config.geometry);

        Ok(Self {
            config,
            client,
            osrm,
            normalizer,
            shutdown: Shutdown::new(),
        })
    }

    /// Use an externally owned stop flag (e.g. one wired to Ctrl+C).
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Full run: collect matches, then write the CSV.
    pub async fn run(&self) -> Result<RunReport, MapperError> {
        let report = self.collect().await?;

        tracing::info!("Outputting to CSV");
        write_csv(Path::new(&self.config.output.filename), &report.records)?;

        Ok(report)
    }

    /// Acquire the source and match every retained feature.
    pub async fn collect(&self) -> Result<RunReport, MapperError> {
        let source = Source::from_config(&self.config.source)?;
        let collection = source.acquire(&self.client).await?;
        let features = take_features(collection, self.config.source.feature_limit);
        Ok(self.process_features(&features).await)
    }

    /// Match `features` in order, stopping early if shutdown is triggered.
    pub async fn process_features(&self, features: &[Feature]) -> RunReport {
        let mut report = RunReport::default();
        let progress = feature_progress(features.len(), self.config.observability.progress);

        for feature in features {
            if self.shutdown.is_triggered() {
                report.interrupted = true;
                break;
            }
            report.considered += 1;

            match self.process_feature(feature).await {
                Ok(record) => report.records.push(record),
                Err(skipped) => {
                    tracing::warn!(
                        road = skipped.id.as_deref().unwrap_or("<unknown>"),
                        reason = %skipped.reason,
                        "Feature skipped"
                    );
                    report.skipped.push(skipped);
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        tracing::info!(
            considered = report.considered,
            matched = report.matched(),
            skipped = report.skipped.len(),
            interrupted = report.interrupted,
            "Matching finished"
        );
        report
    }

    /// Normalize, encode and match a single feature.
    pub async fn process_feature(&self, feature: &Feature) -> Result<MatchRecord, SkippedFeature> {
        let road = RoadFeature::from_geojson(feature).map_err(|e| SkippedFeature {
            id: road_id_hint(feature),
            reason: SkipReason::from(e),
        })?;

        let skip = |reason: SkipReason| SkippedFeature {
            id: Some(road.id.clone()),
            reason,
        };

        let line = self
            .normalizer
            .normalize(&road.geometry)
            .map_err(|e| skip(e.into()))?;
        tracing::debug!(road = %road.id, points = line.0.len(), "Normalized geometry");

        let encoded = encode_line(&line).map_err(|e| skip(e.into()))?;
        let matched = self
            .osrm
            .match_polyline(&encoded)
            .await
            .map_err(|e| skip(e.into()))?;

        tracing::debug!(
            road = %road.id,
            legs = matched.route.node_list.len(),
            retries = matched.retries,
            "Matched"
        );
        Ok(MatchRecord::new(road.id, road.name, matched.route))
    }
}
