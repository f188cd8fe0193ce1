//! Error taxonomy for fetching and scraping.
//!
//! Page-level failures are terminal for their page and propagate to the
//! scrape outcome; field-level misses never reach here (the parser absorbs
//! them as logged warnings).

use thiserror::Error;

/// Failure fetching a single listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The page index is past the last real page, or the site refused the
    /// request. Any non-success status lands here; it is never retried.
    #[error("page does not exist (status {0})")]
    NotFound(u16),

    /// Network-level failure (DNS, connect, TLS, body read).
    #[error("transport failure: {0}")]
    Transport(#[from] wreq::Error),
}

impl FetchError {
    /// Returns true for the distinguished page-does-not-exist condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

/// Failure of a whole scrape or of one page within it.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A page fetch failed; records from other pages may still exist.
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },

    /// Page 1 carried no readable last-page label, so the page count is
    /// unknown and enumeration cannot start.
    #[error("page 1 has no readable last-page indicator")]
    MissingPageCount,

    /// A page worker died before reporting a result.
    #[error("a page worker failed before reporting a result")]
    Worker,
}
