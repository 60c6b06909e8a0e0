//! Listing page retrieval.
//!
//! The query runner only depends on the [`Fetch`] trait; [`HttpFetcher`] is the
//! reqwest implementation used by the binary.

use crate::error::{MedaiError, Result, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// User agent string for requests
pub const USER_AGENT: &str = concat!("rustmedai/", env!("CARGO_PKG_VERSION"));

/// Retrieves raw markup for a URL
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, TransportError>;
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Proxy URL (e.g., "http://127.0.0.1:7890")
    pub proxy: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

/// [`Fetch`] over a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from settings.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an invalid proxy URL or client build failure
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                MedaiError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| MedaiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, TransportError> {
        debug!(url = %url, "Fetching listing page");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.text().await.map_err(connection_error)
    }
}

fn connection_error(e: reqwest::Error) -> TransportError {
    let reason = if e.is_timeout() {
        "timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };
    TransportError::Connection { reason }
}
