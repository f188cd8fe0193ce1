//! HTTP client for Trustpilot requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::trustpilot::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

const DEFAULT_BASE_URL: &str = "https://www.trustpilot.com";

/// Trait for review page fetching - enables mocking for tests.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetches one listing page and returns the HTML response.
    async fn review_page(&self, product: &str, page: u32) -> Result<String, FetchError>;

    /// Returns the URL a listing page is fetched from. Review permalinks are
    /// built against this URL.
    fn page_url(&self, product: &str, page: u32) -> String;
}

/// Trustpilot HTTP client with browser impersonation.
pub struct TrustpilotClient {
    client: Client,
    all_languages: bool,
    base_url: Option<String>,
}

impl TrustpilotClient {
    /// Creates a new client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, all_languages: config.all_languages, base_url })
    }

    /// Returns the base URL (custom for testing, or the production site).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the product's review landing URL.
    pub fn product_url(&self, product: &str) -> String {
        format!("{}/review/{}", self.base_url(), urlencoding::encode(product))
    }

    /// Performs a GET request with browser-like headers.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
            .header("Sec-Ch-Ua-Mobile", "?0")
            .header("Sec-Ch-Ua-Platform", "\"macOS\"")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        // The listing returns a non-success status for any page index past
        // the last real page; there is nothing to retry.
        if !status.is_success() {
            return Err(FetchError::NotFound(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ReviewSource for TrustpilotClient {
    async fn review_page(&self, product: &str, page: u32) -> Result<String, FetchError> {
        let url = self.page_url(product, page);

        info!("Fetching reviews for {} (page {})", product, page);
        self.get(&url).await
    }

    fn page_url(&self, product: &str, page: u32) -> String {
        if self.all_languages {
            format!(
                "{}/review/{}?languages=all&page={}",
                self.base_url(),
                urlencoding::encode(product),
                page
            )
        } else {
            format!("{}/review/{}?page={}", self.base_url(), urlencoding::encode(product), page)
        }
    }
}
