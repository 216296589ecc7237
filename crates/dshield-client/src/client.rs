//! DShield intel feed client.

use crate::api::FeedApi;
use crate::http::{handle_response, transport_error};
use dshield_core::{DshieldError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// The DShield API base URL
pub const DEFAULT_FEED_URL: &str = "https://isc.sans.edu";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the DShield (SANS Internet Storm Center) API
#[derive(Clone)]
pub struct DshieldClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl DshieldClient {
    /// Create a client for the public DShield API using default settings
    pub fn new() -> Result<Self> {
        DshieldClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DshieldClientBuilder {
        DshieldClientBuilder::new()
    }

    /// Access feed endpoints
    #[must_use]
    pub fn feed(&self) -> FeedApi<'_> {
        FeedApi::new(self)
    }

    /// Perform a GET request against a JSON endpoint
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.inner.timeout))?;

        handle_response(response).await
    }

    /// DShield switches an endpoint to JSON with a bare `?json` flag
    fn build_url(&self, path: &str) -> String {
        format!("{}{}?json", self.inner.base_url, path)
    }
}

/// Builder for configuring a [`DshieldClient`]
pub struct DshieldClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for DshieldClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DshieldClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dshield-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DshieldClient> {
        Url::parse(&self.base_url)
            .map_err(|e| DshieldError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| DshieldError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(DshieldClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                timeout: self.timeout,
            }),
        })
    }
}
