//! Data models for extracted reviews.

use serde::{Deserialize, Serialize};

/// A single customer review extracted from a listing page.
///
/// The listing markup is not contractually stable, so no field is required:
/// a review with empty fields is still a valid record. `id` is synthesized
/// from the page number and the card's 1-based position within that page,
/// which keeps it unique and deterministic even when pages are fetched
/// concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Synthesized identifier, `review-<page>-<position>`
    pub id: String,
    /// Review body text with wrapping quote/`<br>`/newline markers stripped
    pub content: String,
    /// ISO-8601 timestamp, verbatim from the `datetime` attribute
    pub date: String,
    /// Star rating (1-5), verbatim from the rating data attribute
    pub rating: String,
    /// Absolute permalink to the individual review
    pub link: String,
    /// Reviewer display name
    pub reviewer_name: String,
}

impl Review {
    /// Creates a review with the synthesized id for the given page/position.
    pub fn new(page: u32, position: usize) -> Self {
        Self {
            id: format!("review-{}-{}", page, position),
            content: String::new(),
            date: String::new(),
            rating: String::new(),
            link: String::new(),
            reviewer_name: String::new(),
        }
    }
}

/// Ordered collection of reviews for one product.
///
/// Append-only while a scrape runs; the pipeline's collector task is its sole
/// owner until completion. Serializes to a document with a single top-level
/// `reviews` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyReviews {
    /// Reviews in arrival order
    pub reviews: Vec<Review>,
}

impl CompanyReviews {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a review.
    pub fn push(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Returns the number of collected reviews.
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Returns true if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
