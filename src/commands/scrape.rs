//! Scrape command implementation.

use crate::config::Config;
use crate::trustpilot::{ReviewSource, ScrapeOutcome, Scraper, TrustpilotClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Executes a full review scrape for one product.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes every review page for the product and returns the outcome.
    ///
    /// The outcome carries whatever was collected even when an error is
    /// attached; deciding what to do with a partial result is the caller's
    /// business.
    pub async fn execute(&self, product: &str) -> Result<ScrapeOutcome> {
        let client =
            TrustpilotClient::new(&self.config).await.context("Failed to create HTTP client")?;

        info!("Scraping reviews for {} at {}", product, client.product_url(product));

        Ok(self.execute_with_client(Arc::new(client), product).await)
    }

    /// Scrapes with a provided page source (for testing).
    pub async fn execute_with_client<C>(&self, client: Arc<C>, product: &str) -> ScrapeOutcome
    where
        C: ReviewSource + 'static,
    {
        Scraper::new(client).max_in_flight(self.config.max_in_flight).run(product).await
    }
}
