//! Trustpilot-specific modules for HTTP client, parsing, and the scrape pipeline.

pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod selectors;

pub use client::{ReviewSource, TrustpilotClient};
pub use error::{FetchError, ScrapeError};
pub use models::{CompanyReviews, Review};
pub use parser::Parser;
pub use pipeline::{ScrapeOutcome, Scraper};
