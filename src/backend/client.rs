//! Bot Backend HTTP Client
//!
//! reqwest client for the backend's JSON API.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{Backend, Endpoint, FetchError, FetchResult};

/// HTTP implementation of [`Backend`]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the bot backend (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: None,
        }
    }
}

impl HttpBackend {
    /// Create a new backend client with the given configuration
    pub fn new(config: BackendConfig) -> FetchResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Full URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path_and_query()
        )
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<serde_json::Value> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Fetching backend endpoint");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            endpoint: endpoint.path().to_string(),
            error: e.to_string(),
        })
    }
}
