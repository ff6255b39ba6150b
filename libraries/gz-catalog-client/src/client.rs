//! Catalog HTTP client.

use std::path::Path;
use std::time::Duration;

use gz_core::Catalog;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{CatalogClientError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where and how to fetch the catalog.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Catalog document URL
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl CatalogClientConfig {
    /// Config with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the catalog document.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    url: Url,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = Url::parse(config.url.trim())
            .map_err(|e| CatalogClientError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatalogClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .user_agent(format!("GzPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    /// Catalog URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and normalize the catalog.
    ///
    /// Always bypasses HTTP caches so a republished catalog shows up on the
    /// next load.
    pub async fn fetch(&self) -> Result<Catalog> {
        debug!(url = %self.url, "Fetching catalog");

        let response = self
            .http
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogClientError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let catalog = parse(&body)?;

        info!(url = %self.url, tracks = catalog.len(), "Catalog fetched");
        Ok(catalog)
    }

    /// Read a catalog document from disk.
    pub async fn load_file(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let body = tokio::fs::read_to_string(path).await?;
        let catalog = parse(&body)?;

        info!(path = %path.display(), tracks = catalog.len(), "Catalog loaded from file");
        Ok(catalog)
    }
}

fn parse(body: &str) -> Result<Catalog> {
    Catalog::from_json(body).map_err(|e| CatalogClientError::Parse(e.to_string()))
}
