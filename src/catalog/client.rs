//! HTTP client for catalog requests using wreq for browser emulation.

use crate::catalog::sources::{encode_query, Source};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// User agent sent to sites that accept plain clients.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Trait for fetching catalog result pages - enables mocking for tests.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Fetches one results page of `source` for `query` and returns the HTML.
    async fn search(&self, source: Source, query: &str, page: u32) -> Result<String>;
}

/// Catalog HTTP client with optional browser impersonation.
pub struct CatalogClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl CatalogClient {
    /// Creates a new catalog client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a client that sends every source to `base_url` (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or the site's own).
    fn base_url(&self, source: Source) -> String {
        self.base_url.clone().unwrap_or_else(|| source.base_url().to_string())
    }

    /// Builds the full URL for one results page.
    pub fn search_url(&self, source: Source, query: &str, page: u32) -> String {
        format!("{}{}", self.base_url(source), source.search_path(&encode_query(query), page))
    }

    /// Performs a GET request, impersonating a browser when `browser` is set.
    async fn get(&self, url: &str, browser: bool) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let request = if browser {
            self.client
                .get(url)
                .emulation(Emulation::Chrome131)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "en-US,en;q=0.9")
                .header("Upgrade-Insecure-Requests", "1")
        } else {
            self.client.get(url).header("User-Agent", USER_AGENT).header("Accept", "text/html")
        };

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a random delay between requests when configured.
    async fn delay(&self) {
        if self.delay_ms == 0 && self.delay_jitter_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl CatalogSearch for CatalogClient {
    async fn search(&self, source: Source, query: &str, page: u32) -> Result<String> {
        let url = self.search_url(source, query, page);

        info!("Searching {}: {} (page {})", source, query, page);
        self.get(&url, source.requires_browser()).await
    }
}
