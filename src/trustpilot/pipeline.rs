//! Concurrent scrape pipeline: page-count discovery, fan-out, fan-in.
//!
//! Page 1 is fetched synchronously and carries the total page count. The
//! remaining pages are fetched by one producer task each, bounded by a
//! semaphore. Producers stream extracted records into an mpsc channel; the
//! driver is the single consumer and sole owner of the growing collection,
//! so no state is shared between tasks. The channel closing (every producer
//! done, whether by success or failure) is the completion signal.

use crate::trustpilot::client::ReviewSource;
use crate::trustpilot::error::ScrapeError;
use crate::trustpilot::models::{CompanyReviews, Review};
use crate::trustpilot::parser::Parser;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Result of one scrape: whatever was collected, plus the first error if any.
///
/// A scrape that errs mid-flight keeps the records that reached the collector
/// before the failure, so callers can tell apart a complete run, a partial
/// one, and a total failure.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Collected reviews, in arrival order.
    pub reviews: CompanyReviews,
    /// First error encountered, if any.
    pub error: Option<ScrapeError>,
}

impl ScrapeOutcome {
    fn failed(error: ScrapeError) -> Self {
        Self { reviews: CompanyReviews::new(), error: Some(error) }
    }

    /// Every page was fetched and extracted.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Some pages failed but records from completed pages were kept.
    pub fn is_partial(&self) -> bool {
        self.error.is_some() && !self.reviews.is_empty()
    }

    /// Nothing was collected.
    pub fn is_failure(&self) -> bool {
        self.error.is_some() && self.reviews.is_empty()
    }
}

/// Drives a full scrape of one product's reviews.
pub struct Scraper<C> {
    client: Arc<C>,
    max_in_flight: usize,
}

impl<C: ReviewSource + 'static> Scraper<C> {
    /// Creates a scraper over the given page source.
    pub fn new(client: Arc<C>) -> Self {
        Self { client, max_in_flight: DEFAULT_MAX_IN_FLIGHT }
    }

    /// Caps the number of trailing pages fetched concurrently.
    pub fn max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = limit.max(1);
        self
    }

    /// Scrapes every review page for `product`.
    ///
    /// A failing trailing page does not cancel its in-flight siblings; their
    /// records still land in the outcome alongside the error.
    pub async fn run(&self, product: &str) -> ScrapeOutcome {
        let parser = Parser::new();

        // Page 1 comes first and alone: it carries the page count
        let first_url = self.client.page_url(product, 1);
        let html = match self.client.review_page(product, 1).await {
            Ok(html) => html,
            Err(source) => {
                return ScrapeOutcome::failed(ScrapeError::Fetch { page: 1, source });
            }
        };

        let first = parser.parse_page(&html, &first_url, 1);
        let total = match first.last_page {
            Some(n) => n,
            None => return ScrapeOutcome::failed(ScrapeError::MissingPageCount),
        };
        info!("Product {} has {} review pages", product, total);

        let (tx, mut rx) = mpsc::unbounded_channel();

        for extracted in first.reviews {
            let _ = tx.send(extracted);
        }

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut workers = JoinSet::new();

        for page in 2..=total {
            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let product = product.to_string();

            workers.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed while workers run
                    Err(_) => return (page, Err(ScrapeError::Worker)),
                };
                (page, fetch_page(client.as_ref(), &product, page, &tx).await)
            });
        }
        drop(tx);

        // Single-owner collection: drain until every producer has dropped
        // its sender
        let mut reviews = CompanyReviews::new();
        while let Some(extracted) = rx.recv().await {
            reviews.push(extracted);
        }

        // All producers are done sending; surface the first page failure
        let mut error = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((page, Err(e))) => {
                    warn!("Page {} failed: {}", page, e);
                    error.get_or_insert(e);
                }
                Err(join_err) => {
                    warn!("Page worker aborted: {}", join_err);
                    error.get_or_insert(ScrapeError::Worker);
                }
            }
        }

        debug!("Collected {} reviews across {} pages", reviews.len(), total);
        ScrapeOutcome { reviews, error }
    }
}

/// Fetches and parses one trailing page, streaming its records to the
/// collector in document order.
async fn fetch_page<C: ReviewSource>(
    client: &C,
    product: &str,
    page: u32,
    tx: &UnboundedSender<Review>,
) -> Result<(), ScrapeError> {
    let url = client.page_url(product, page);
    let html = client
        .review_page(product, page)
        .await
        .map_err(|source| ScrapeError::Fetch { page, source })?;

    let parsed = Parser::new().parse_page(&html, &url, page);
    for extracted in parsed.reviews {
        // A closed channel means the collector is gone; nothing left to do
        if tx.send(extracted).is_err() {
            break;
        }
    }

    Ok(())
}
