//! tp-reviews - Fast, stateless Trustpilot review scraper CLI
//!
//! Concurrent pagination-and-extraction pipeline with TLS fingerprint
//! emulation for reliable scraping without detection.

pub mod commands;
pub mod config;
pub mod format;
pub mod trustpilot;

pub use config::Config;
pub use trustpilot::models::{CompanyReviews, Review};
pub use trustpilot::pipeline::{ScrapeOutcome, Scraper};
