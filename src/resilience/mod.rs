//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! OSRM request:
//!     → reqwest client timeouts (connect/request)
//!     → On 429: retries.rs (pick wait, check retry cap)
//!     → backoff.rs when the response carries no wait hint
//! ```
//!
//! # Design Decisions
//! - Only 429 is retried; every other failure drops the feature
//! - Unlimited retries unless a cap is configured

pub mod backoff;
pub mod retries;

pub use backoff::{calculate_backoff, Backoff};
pub use retries::{RateLimitPolicy, WaitSource, RATE_LIMIT_INTERVAL_HEADER};
