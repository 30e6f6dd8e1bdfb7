//! HTTP feed fetcher.
//!
//! Fetches feeds with a plain `GET` and maps HTTP failures onto
//! [`ProviderErrorCode`](crate::ProviderErrorCode)s.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::fetch::{BoxFuture, FeedFetcher};

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl HttpConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("nextevent/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new HTTP fetcher with the given configuration.
    pub fn new(config: &HttpConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_provider("http")
                    .with_source(e)
            })?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> ProviderResult<String> {
        trace!(url = %url, "Sending request");

        let response = self.client.get(url).send().await.map_err(|e| {
            ProviderError::network(format!("Request failed: {}", e)).with_source(e)
        })?;

        handle_response(response).await
    }
}

impl FeedFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        let url = url.to_string();
        Box::pin(async move {
            let body = self
                .get(&url)
                .await
                .map_err(|e| e.with_provider("http"))?;
            debug!(url = %url, bytes = body.len(), "Fetched feed");
            Ok(body)
        })
    }
}

/// Handles the HTTP response and extracts the body.
async fn handle_response(response: Response) -> ProviderResult<String> {
    let status = response.status();
    trace!(status = %status, "Received response");

    match status {
        s if s.is_success() => {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ProviderError::network(format!("Failed to read response: {}", e)))?;
            String::from_utf8(bytes.to_vec()).map_err(|e| {
                ProviderError::invalid_response("Feed body is not valid UTF-8").with_source(e)
            })
        }
        StatusCode::NOT_FOUND => Err(ProviderError::not_found("Feed not found")),
        s if s.is_server_error() => {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::server(format!("Server error ({}): {}", s, body)))
        }
        s if s.is_client_error() => {
            warn!(status = %s, "Feed request rejected");
            Err(ProviderError::bad_request(format!("Request rejected ({})", s)))
        }
        s => Err(ProviderError::invalid_response(format!(
            "Unexpected status {}",
            s
        ))),
    }
}
