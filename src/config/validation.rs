//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and env parsing handle syntax)
//! - Check the selected source has its location set
//! - Validate URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MapperConfig → Result<(), Vec<ValidationError>>
//! - Runs before any network or file access

use thiserror::Error;
use url::Url;

use crate::config::schema::MapperConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("HVS_USE_URL is set but HVS_URL is missing")]
    MissingSourceUrl,

    #[error("HVS_PATH is required when not reading from a URL")]
    MissingSourcePath,

    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("OUTPUT_FILENAME must not be empty")]
    EmptyOutput,

    #[error("feature limit must be at least 1")]
    ZeroFeatureLimit,

    #[error("OSRM profile must not be empty")]
    EmptyProfile,

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidTolerance { field: &'static str, value: f64 },

    #[error("base retry delay ({base_ms}ms) exceeds maximum ({max_ms}ms)")]
    BackoffRange { base_ms: u64, max_ms: u64 },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a fully layered configuration.
pub fn validate_config(config: &MapperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.source.use_url {
        match config.source.url.as_deref() {
            None | Some("") => errors.push(ValidationError::MissingSourceUrl),
            Some(url) => check_url("HVS_URL", url, &mut errors),
        }
    } else if config.source.path.as_deref().map_or(true, str::is_empty) {
        errors.push(ValidationError::MissingSourcePath);
    }

    if config.source.feature_limit == 0 {
        errors.push(ValidationError::ZeroFeatureLimit);
    }

    check_url("OSRM_SERVER", &config.osrm.server, &mut errors);

    if config.osrm.profile.trim().is_empty() {
        errors.push(ValidationError::EmptyProfile);
    }

    for (field, value) in [
        ("snap_tolerance", config.geometry.snap_tolerance),
        ("simplify_epsilon", config.geometry.simplify_epsilon),
        ("carriageway_width", config.geometry.carriageway_width),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::InvalidTolerance { field, value });
        }
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffRange {
            base_ms: config.retries.base_delay_ms,
            max_ms: config.retries.max_delay_ms,
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.output.filename.trim().is_empty() {
        errors.push(ValidationError::EmptyOutput);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError::InvalidUrl {
            field,
            reason: "not a base URL".to_string(),
        }),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            reason: e.to_string(),
        }),
    }
}
