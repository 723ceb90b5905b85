//! Retry logic for rate-limited OSRM requests.
//!
//! # Responsibilities
//! - Decide how long to wait after an HTTP 429
//! - Enforce the optional per-feature retry cap
//!
//! # Wait Selection
//! ```text
//! X-Rate-Limit-Interval present → interval / 2
//! else Retry-After (seconds)    → as given
//! else                          → exponential backoff + jitter
//! ```
//!
//! Header-derived waits are capped at `max_advised_wait_secs`.
//!
//! The demo OSRM server does not send `X-Rate-Limit-Interval`, so the
//! fallbacks are what normally applies.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

use crate::config::RetryConfig;
use crate::resilience::backoff::Backoff;

/// Header carrying the rate-limit window, in seconds.
pub const RATE_LIMIT_INTERVAL_HEADER: &str = "x-rate-limit-interval";

/// Where a wait duration was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitSource {
    RateLimitInterval,
    RetryAfter,
    Backoff,
}

/// Policy applied to HTTP 429 responses.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    max_retries: u32,
    backoff: Backoff,
    max_advised: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_retries: u32, backoff: Backoff, max_advised: Duration) -> Self {
        Self {
            max_retries,
            backoff,
            max_advised,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_rate_limit_retries,
            Backoff::from(config),
            Duration::from_secs(config.max_advised_wait_secs),
        )
    }

    /// Whether another retry is allowed after `retries` have been made.
    /// A cap of zero never stops retrying.
    pub fn allows(&self, retries: u32) -> bool {
        self.max_retries == 0 || retries < self.max_retries
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait duration before retry number `attempt` (1-based).
    pub fn wait_for(&self, headers: &HeaderMap, attempt: u32) -> (Duration, WaitSource) {
        if let Some(secs) = header_secs(headers, RATE_LIMIT_INTERVAL_HEADER) {
            return (self.advised(secs / 2.0), WaitSource::RateLimitInterval);
        }
        if let Some(secs) = header_secs(headers, RETRY_AFTER.as_str()) {
            return (self.advised(secs), WaitSource::RetryAfter);
        }
        (self.backoff.delay(attempt), WaitSource::Backoff)
    }

    // Values too large for a Duration saturate to the cap.
    fn advised(&self, secs: f64) -> Duration {
        Duration::try_from_secs_f64(secs)
            .map_or(self.max_advised, |wait| wait.min(self.max_advised))
    }
}

fn header_secs(headers: &HeaderMap, name: &str) -> Option<f64> {
    let secs: f64 = headers.get(name)?.to_str().ok()?.trim().parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}
