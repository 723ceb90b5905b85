//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → .env file + process environment (loader.rs)
//!     → CLI flags (main.rs)
//!     → validation.rs (semantic checks)
//!     → MapperConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - The five HVS/OSRM environment variables are the primary interface
//! - Validation separates syntactic (serde/env parsing) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, validated, ConfigError};
pub use schema::{
    GeometryConfig, MapperConfig, ObservabilityConfig, OsrmConfig, OutputConfig, RetryConfig,
    SourceConfig, TimeoutConfig,
};
