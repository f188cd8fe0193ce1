//! CSS selectors for Trustpilot listing pages.
//!
//! This file contains all CSS selectors used for parsing review listings.
//! Update this file when Trustpilot changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for review cards.
pub mod review {
    use super::*;

    /// Review card container. The class hash suffix changes between site
    /// deployments, so match on the stable prefix.
    pub static CARD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class^='styles_cardWrapper__']").unwrap());

    /// A real review card wraps an `article`; promo/filter cards do not.
    pub static CARD_ARTICLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("article").unwrap());

    /// Reviewer display name.
    pub static REVIEWER_NAME: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "aside[class^='styles_consumerInfoWrapper__'] \
             a[name='consumer-profile'] > span[class^='typography_heading']",
        )
        .unwrap()
    });

    /// Review timestamp element.
    pub static TIMESTAMP: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time").unwrap());

    /// Attribute holding the ISO-8601 timestamp.
    pub static TIMESTAMP_ATTR: &str = "datetime";

    /// Content section of a card; rating, permalink, and body live under it.
    pub static CONTENT_SECTION: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("section[class^='styles_reviewContentwrapper__']").unwrap()
    });

    /// Header row carrying the star rating.
    pub static HEADER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class^='styles_reviewHeader__']").unwrap());

    /// Attribute holding the 1-5 star rating.
    pub static RATING_ATTR: &str = "data-service-review-rating";

    /// Anchor with the relative permalink to the individual review.
    pub static PERMALINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class^='styles_reviewContent__'] a").unwrap());

    /// Review body paragraph.
    pub static BODY: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div[class^='styles_reviewContent__'] \
             p[data-service-review-text-typography='true']",
        )
        .unwrap()
    });
}

/// Selectors for the pagination control.
pub mod pagination {
    use super::*;

    /// "Last page" button; its label is the total page count.
    pub static LAST_PAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[name='pagination-button-last']").unwrap());
}
