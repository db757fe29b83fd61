use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raw response as returned by the API. The body is kept as text so
/// assertions can quote it verbatim.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_throttled(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Thin GET-only client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build().map_err(ClientError::Build)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one GET to `{base}{endpoint}`. Any status is a valid
    /// response here; only transport failures are errors.
    #[instrument(skip(self, query), fields(base = %self.base_url))]
    pub async fn get<Q>(&self, endpoint: &str, query: &Q) -> Result<ApiResponse, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let started = Instant::now();

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ClientError::Body { url: url.clone(), source })?;
        let elapsed = started.elapsed();

        debug!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "GET {endpoint}");

        Ok(ApiResponse { url, status: status.as_u16(), body, elapsed })
    }
}
