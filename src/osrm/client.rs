//! OSRM HTTP client with rate-limit handling.
//!
//! # Responsibilities
//! - Build the route request URL around an encoded polyline
//! - Retry on HTTP 429 according to [`RateLimitPolicy`]
//! - Reduce a 200 response to the configured route
//! - Report every other status as a failure for the feature

use reqwest::StatusCode;
use url::{form_urlencoded, Url};

use crate::config::{OsrmConfig, RetryConfig};
use crate::osrm::types::{MatchError, MatchedRoute, RouteResponse};
use crate::resilience::RateLimitPolicy;

/// Fixed query string sent with every route request.
pub const ROUTE_QUERY: &str = "steps=false&geometries=geojson&overview=full&annotations=true";

/// A successful OSRM call.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub route: MatchedRoute,
    /// Number of 429 responses waited out before success.
    pub retries: u32,
}

/// Client for the OSRM route service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: reqwest::Client,
    base: Url,
    profile: String,
    route_index: usize,
    policy: RateLimitPolicy,
}

impl OsrmClient {
    pub fn new(
        client: reqwest::Client,
        config: &OsrmConfig,
        retries: &RetryConfig,
    ) -> Result<Self, MatchError> {
        let base = Url::parse(&config.server)
            .map_err(|e| MatchError::BaseUrl(format!("{}: {}", config.server, e)))?;
        if base.cannot_be_a_base() {
            return Err(MatchError::BaseUrl(config.server.clone()));
        }

        Ok(Self {
            client,
            base,
            profile: config.profile.clone(),
            route_index: config.route_index,
            policy: RateLimitPolicy::from_config(retries),
        })
    }

    /// `{server}route/v1/{profile}/polyline({encoded})?{ROUTE_QUERY}`
    ///
    /// The polyline alphabet includes `?`, `\`, `|` and brackets, so it is
    /// fully percent-encoded.
    pub fn route_url(&self, encoded: &str) -> Url {
        let prefix = self.base.path().trim_end_matches('/');
        let polyline: String = form_urlencoded::byte_serialize(encoded.as_bytes()).collect();

        let mut url = self.base.clone();
        url.set_path(&format!("{prefix}/route/v1/{}/polyline({polyline})", self.profile));
        url.set_query(Some(ROUTE_QUERY));
        url
    }

    /// Route an encoded polyline, waiting out rate limiting.
    pub async fn match_polyline(&self, encoded: &str) -> Result<Matched, MatchError> {
        let url = self.route_url(encoded);
        let mut retries = 0u32;

        loop {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                if !self.policy.allows(retries) {
                    return Err(MatchError::RateLimited(retries));
                }
                retries += 1;
                let (wait, source) = self.policy.wait_for(response.headers(), retries);
                tracing::warn!(
                    retry = retries,
                    wait_ms = wait.as_millis() as u64,
                    source = ?source,
                    "Rate limited by OSRM, waiting before retry"
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            if status != StatusCode::OK {
                return Err(MatchError::Status(status.as_u16()));
            }

            let body: RouteResponse = response
                .json()
                .await
                .map_err(|e| MatchError::Malformed(e.to_string()))?;
            tracing::debug!(code = ?body.code, routes = body.routes.len(), "OSRM response");

            let route = body.select(self.route_index)?;
            return Ok(Matched { route, retries });
        }
    }
}
