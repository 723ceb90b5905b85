//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events on stderr)
//!     → progress.rs (one bar across the feature loop)
//! ```
//!
//! # Design Decisions
//! - Structured fields (road id, status, retry) instead of formatted strings
//! - Progress bar is cosmetic and hidden in tests and when disabled

pub mod logging;
pub mod progress;

pub use logging::init_logging;
pub use progress::feature_progress;
