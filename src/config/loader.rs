//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::MapperConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_USE_URL: &str = "HVS_USE_URL";
pub const ENV_PATH: &str = "HVS_PATH";
pub const ENV_URL: &str = "HVS_URL";
pub const ENV_OSRM_SERVER: &str = "OSRM_SERVER";
pub const ENV_OUTPUT: &str = "OUTPUT_FILENAME";
pub const ENV_FEATURE_LIMIT: &str = "HVS_FEATURE_LIMIT";
pub const ENV_PROFILE: &str = "OSRM_PROFILE";
pub const ENV_ROUTE_INDEX: &str = "OSRM_ROUTE_INDEX";
pub const ENV_MAX_RATE_LIMIT_RETRIES: &str = "OSRM_MAX_RATE_LIMIT_RETRIES";
pub const ENV_LOG_LEVEL: &str = "HVS_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a `.env` file into the process environment.
///
/// Without an explicit path a missing `.env` is not an error. Variables
/// already present in the environment are never overwritten.
pub fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|_| ()),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if path.is_none() && e.not_found() => {
            tracing::debug!("No .env file found, using process environment only");
            Ok(())
        }
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

/// Parse a TOML configuration file. Missing sections take their defaults.
pub fn read_config_file(path: &Path) -> Result<MapperConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Build a configuration from an optional TOML base and the process
/// environment.
pub fn load_config(file: Option<&Path>) -> Result<MapperConfig, ConfigError> {
    let mut config = match file {
        Some(path) => read_config_file(path)?,
        None => MapperConfig::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so callers can supply a fixed map.
pub fn apply_env<F>(config: &mut MapperConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_USE_URL) {
        config.source.use_url = value.trim().eq_ignore_ascii_case("true");
    }
    if let Some(value) = lookup(ENV_PATH) {
        config.source.path = Some(value);
    }
    if let Some(value) = lookup(ENV_URL) {
        config.source.url = Some(value);
    }
    if let Some(value) = lookup(ENV_OSRM_SERVER) {
        config.osrm.server = value;
    }
    if let Some(value) = lookup(ENV_OUTPUT) {
        config.output.filename = value;
    }
    if let Some(value) = lookup(ENV_PROFILE) {
        config.osrm.profile = value;
    }
    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = value;
    }
    if let Some(limit) = parse_var(&lookup, ENV_FEATURE_LIMIT)? {
        config.source.feature_limit = limit;
    }
    if let Some(index) = parse_var(&lookup, ENV_ROUTE_INDEX)? {
        config.osrm.route_index = index;
    }
    if let Some(retries) = parse_var(&lookup, ENV_MAX_RATE_LIMIT_RETRIES)? {
        config.retries.max_rate_limit_retries = retries;
    }
    Ok(())
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Env {
                var,
                value,
                reason: e.to_string(),
            }),
    }
}

/// Run semantic validation, consuming and returning the config on success.
pub fn validated(config: MapperConfig) -> Result<MapperConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overlay() {
        let mut config = MapperConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("HVS_USE_URL", "True"),
                ("HVS_URL", "https://example.com/hvs.geojson"),
                ("OSRM_SERVER", "http://osrm:5000/"),
                ("OUTPUT_FILENAME", "out/nodes.csv"),
                ("HVS_FEATURE_LIMIT", "25"),
            ]),
        )
        .unwrap();

        assert!(config.source.use_url);
        assert_eq!(config.source.url.as_deref(), Some("https://example.com/hvs.geojson"));
        assert_eq!(config.osrm.server, "http://osrm:5000/");
        assert_eq!(config.output.filename, "out/nodes.csv");
        assert_eq!(config.source.feature_limit, 25);
    }

    #[test]
    fn test_use_url_only_for_true() {
        let mut config = MapperConfig::default();
        for (value, expected) in [
            ("False", false),
            ("True", true),
            ("yes", false),
            ("true", true),
            ("1", false),
            (" TRUE ", true),
        ] {
            apply_env(&mut config, env(&[("HVS_USE_URL", value)])).unwrap();
            assert_eq!(config.source.use_url, expected, "HVS_USE_URL={value:?}");
        }
    }

    #[test]
    fn test_bad_number_is_reported() {
        let mut config = MapperConfig::default();
        let err = apply_env(&mut config, env(&[("OSRM_ROUTE_INDEX", "first")])).unwrap_err();
        match err {
            ConfigError::Env { var, value, .. } => {
                assert_eq!(var, "OSRM_ROUTE_INDEX");
                assert_eq!(value, "first");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[output]\nfilename = \"from_file.csv\"\n\n[osrm]\nprofile = \"truck\""
        )
        .unwrap();

        let mut config = read_config_file(file.path()).unwrap();
        apply_env(&mut config, env(&[("OUTPUT_FILENAME", "from_env.csv")])).unwrap();

        assert_eq!(config.output.filename, "from_env.csv");
        assert_eq!(config.osrm.profile, "truck");
    }

    #[test]
    fn test_validated_rejects_missing_path() {
        let err = validated(MapperConfig::default()).unwrap_err();
        assert!(err.to_string().contains("HVS_PATH"));
    }
}
