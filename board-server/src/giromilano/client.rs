//! GiroMilano HTTP client.
//!
//! One GET per poll against the TPPortal stop endpoint. The endpoint is
//! public but sits behind bot protection that rejects bare clients, so
//! every request carries browser-like headers. Failures are classified
//! into [`FetchError`]; no retries happen at this layer.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, REFERER};

use crate::board::StopId;
use crate::poll::StopFetcher;

use super::error::FetchError;
use super::types::StopPayload;

/// Default base URL for the GiroMilano TPPortal API.
const DEFAULT_BASE_URL: &str = "https://giromilano.atm.it/proxy.tpportal/api/tpPortal";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for the GiroMilano client.
#[derive(Debug, Clone)]
pub struct GiroConfig {
    /// Base URL for the API (defaults to the production portal).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GiroConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GiroConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the stop-arrivals endpoint.
#[derive(Debug, Clone)]
pub struct GiroClient {
    http: reqwest::Client,
    base_url: String,
}

impl GiroClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GiroConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        // Mimic the GiroMilano web portal; the protection layer rejects
        // requests without these.
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("it-IT,it;q=0.9,en;q=0.8"));
        headers.insert(REFERER, HeaderValue::from_static("https://giromilano.atm.it/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://giromilano.atm.it"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the raw arrivals payload for a stop.
    pub async fn fetch_stop(&self, stop: &StopId) -> Result<StopPayload, FetchError> {
        let url = format!("{}/geodata/pois/stops/{}", self.base_url, stop.as_str());

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::StopNotFound);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        // The protection layer serves HTML "Access Denied" pages with a
        // 200 status; classify those as upstream errors, not decode bugs.
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html"));

        let body = response.text().await?;

        if is_html {
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl StopFetcher for GiroClient {
    async fn fetch_stop(&self, stop: &StopId) -> Result<StopPayload, FetchError> {
        self.fetch_stop(stop).await
    }
}
