//! HTML parser for Trustpilot review listing pages.

use crate::trustpilot::models::Review;
use crate::trustpilot::selectors::{pagination, review};
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};

/// Outcome of parsing one listing page.
#[derive(Debug)]
pub struct ParsedPage {
    /// Reviews in document order.
    pub reviews: Vec<Review>,
    /// Total page count read from the pagination control, when present.
    pub last_page: Option<u32>,
}

/// Parser for review listing HTML.
///
/// Parsing never fails: the markup is not contractually stable, so every
/// per-card lookup tolerates a missing target and substitutes an empty
/// string, and the pagination indicator is optional. Callers decide whether
/// a missing indicator is terminal.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a listing page into review records and the last-page label.
    ///
    /// `page_url` is the URL this HTML was fetched from; review permalinks
    /// are built by appending each card's relative href to it.
    pub fn parse_page(&self, html: &str, page_url: &str, page: u32) -> ParsedPage {
        let document = Html::parse_document(html);

        let mut reviews = Vec::new();
        let cards = document
            .select(&review::CARD)
            .filter(|card| card.select(&review::CARD_ARTICLE).next().is_some());

        for (i, card) in cards.enumerate() {
            let extracted = self.extract_review(card, page_url, page, i + 1);
            trace!("Extracted {} by {:?}", extracted.id, extracted.reviewer_name);
            reviews.push(extracted);
        }

        let last_page = self.parse_last_page(&document);

        debug!(
            "Parsed {} reviews from page {} (last_page: {:?})",
            reviews.len(),
            page,
            last_page
        );

        ParsedPage { reviews, last_page }
    }

    /// Extracts one review from a card node.
    ///
    /// Pure function of the node: never fails, emits a record even when every
    /// lookup misses. Each miss is logged and substituted with an empty
    /// string.
    fn extract_review(
        &self,
        card: ElementRef<'_>,
        page_url: &str,
        page: u32,
        position: usize,
    ) -> Review {
        let mut out = Review::new(page, position);

        match card.select(&review::REVIEWER_NAME).next() {
            Some(el) => out.reviewer_name = el.text().collect::<String>().trim().to_string(),
            None => warn!("Could not find reviewer name for {}", out.id),
        }

        match card
            .select(&review::TIMESTAMP)
            .next()
            .and_then(|el| el.value().attr(review::TIMESTAMP_ATTR))
        {
            Some(datetime) => out.date = datetime.to_string(),
            None => warn!("Could not find timestamp for {}", out.id),
        }

        // Rating, permalink, and body all live under the content section
        let section = card.select(&review::CONTENT_SECTION).next();

        match section
            .and_then(|s| s.select(&review::HEADER).next())
            .and_then(|el| el.value().attr(review::RATING_ATTR))
        {
            Some(rating) => out.rating = rating.to_string(),
            None => warn!("Could not find rating for {}", out.id),
        }

        match section
            .and_then(|s| s.select(&review::PERMALINK).next())
            .and_then(|el| el.value().attr("href"))
        {
            Some(href) => out.link = format!("{}{}", page_url, href),
            None => warn!("Could not find review link for {}", out.id),
        }

        match section.and_then(|s| s.select(&review::BODY).next()) {
            Some(el) => out.content = clean_body(&el.text().collect::<String>()),
            None => warn!("Could not find review body for {}", out.id),
        }

        out
    }

    /// Reads the total page count from the pagination control.
    fn parse_last_page(&self, document: &Html) -> Option<u32> {
        let label = document
            .select(&pagination::LAST_PAGE)
            .next()
            .map(|el| el.text().collect::<String>())?;

        match label.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!("Pagination label {:?} is not a page number", label);
                None
            }
        }
    }
}

/// Strips the wrapping markers the listing adds around body text.
///
/// Single strips in fixed order: one leading `"`, one leading `<br>`, one
/// trailing newline, one trailing `"`. These are not trims-to-fixed-point, so
/// a body that genuinely starts and ends with literal quotes loses both.
fn clean_body(text: &str) -> String {
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_prefix("<br>").unwrap_or(text);
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.trustpilot.com/review/acme.com?languages=all&page=1";

    fn make_card(name: &str, date: &str, rating: &str, href: &str, body: &str) -> String {
        format!(
            r#"<div class="styles_cardWrapper__g8amF">
                <article>
                    <aside class="styles_consumerInfoWrapper__KP8xH">
                        <a name="consumer-profile" href="/users/1"><span class="typography_heading-xs__1a2b3">{name}</span></a>
                    </aside>
                    <time datetime="{date}">some date</time>
                    <section class="styles_reviewContentwrapper__Jf6x2">
                        <div class="styles_reviewHeader__z9qQv" data-service-review-rating="{rating}"></div>
                        <div class="styles_reviewContent__v4Qc9">
                            <a href="{href}">Review title</a>
                            <p data-service-review-text-typography="true">{body}</p>
                        </div>
                    </section>
                </article>
            </div>"#
        )
    }

    fn make_page(cards: &[String], last_page: Option<u32>) -> String {
        let mut html = String::from("<html><body>");
        for card in cards {
            html.push_str(card);
        }
        if let Some(n) = last_page {
            html.push_str(&format!(
                r#"<nav><a name="pagination-button-last" href="?page={n}">{n}</a></nav>"#
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn extract_first(html: &str) -> Review {
        let document = Html::parse_document(html);
        let card = document.select(&review::CARD).next().unwrap();
        Parser::new().extract_review(card, PAGE_URL, 1, 1)
    }

    // Body cleaning tests

    #[test]
    fn test_clean_body_fully_wrapped() {
        assert_eq!(clean_body("\"<br>Great service\"\n"), "Great service");
    }

    #[test]
    fn test_clean_body_plain_text() {
        assert_eq!(clean_body("Great service"), "Great service");
        assert_eq!(clean_body(""), "");
    }

    #[test]
    fn test_clean_body_quotes_only() {
        assert_eq!(clean_body("\"wrapped\""), "wrapped");
    }

    #[test]
    fn test_clean_body_trailing_newline_only() {
        assert_eq!(clean_body("no quotes here\n"), "no quotes here");
    }

    #[test]
    fn test_clean_body_strips_are_single() {
        // One marker of each kind is removed, never more
        assert_eq!(clean_body("\"\"double\"\""), "\"double\"");
        assert_eq!(clean_body("text\n\n"), "text\n");
    }

    #[test]
    fn test_clean_body_stable_on_single_wrapped() {
        let once = clean_body("\"<br>stable\"\n");
        assert_eq!(clean_body(&once), once);
    }

    #[test]
    fn test_clean_body_inner_markers_untouched() {
        assert_eq!(clean_body("said \"hi\" twice"), "said \"hi\" twice");
        assert_eq!(clean_body("line one\nline two"), "line one\nline two");
    }

    // Field extraction tests

    #[test]
    fn test_extract_full_card() {
        let card = make_card(
            "Jane Doe",
            "2023-08-14T10:12:31.000Z",
            "5",
            "/reviews/abc123",
            "\"Great service\"",
        );
        let extracted = extract_first(&card);

        assert_eq!(extracted.id, "review-1-1");
        assert_eq!(extracted.reviewer_name, "Jane Doe");
        assert_eq!(extracted.date, "2023-08-14T10:12:31.000Z");
        assert_eq!(extracted.rating, "5");
        assert_eq!(extracted.link, format!("{}{}", PAGE_URL, "/reviews/abc123"));
        assert_eq!(extracted.content, "Great service");
    }

    #[test]
    fn test_extract_rating_verbatim() {
        let card = make_card("A", "2023-01-01T00:00:00.000Z", "3", "/r/1", "ok");
        assert_eq!(extract_first(&card).rating, "3");
    }

    #[test]
    fn test_extract_missing_rating() {
        let html = r#"<div class="styles_cardWrapper__x"><article>
            <time datetime="2023-01-01T00:00:00.000Z">d</time>
            <section class="styles_reviewContentwrapper__x">
                <div class="styles_reviewContent__x"><a href="/r/1">t</a><p data-service-review-text-typography="true">body</p></div>
            </section>
        </article></div>"#;
        let extracted = extract_first(html);

        assert_eq!(extracted.rating, "");
        assert_eq!(extracted.content, "body");
        assert_eq!(extracted.date, "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_extract_missing_anchor_yields_empty_link() {
        let html = r#"<div class="styles_cardWrapper__x"><article>
            <section class="styles_reviewContentwrapper__x">
                <div class="styles_reviewHeader__x" data-service-review-rating="4"></div>
                <div class="styles_reviewContent__x"><p data-service-review-text-typography="true">body</p></div>
            </section>
        </article></div>"#;
        let extracted = extract_first(html);

        assert_eq!(extracted.link, "");
        assert_eq!(extracted.rating, "4");
    }

    #[test]
    fn test_extract_bare_card_emits_empty_record() {
        // Nothing recognizable inside the card: the record is still emitted
        let html = r#"<div class="styles_cardWrapper__x"><article><p>unrelated</p></article></div>"#;
        let extracted = extract_first(html);

        assert_eq!(extracted.id, "review-1-1");
        assert_eq!(extracted.reviewer_name, "");
        assert_eq!(extracted.date, "");
        assert_eq!(extracted.rating, "");
        assert_eq!(extracted.link, "");
        assert_eq!(extracted.content, "");
    }

    #[test]
    fn test_extract_is_pure() {
        let card = make_card("Jane", "2023-08-14T10:12:31.000Z", "5", "/r/9", "\"text\"\n");
        let document = Html::parse_document(&card);
        let node = document.select(&review::CARD).next().unwrap();
        let parser = Parser::new();

        let first = parser.extract_review(node, PAGE_URL, 2, 3);
        let second = parser.extract_review(node, PAGE_URL, 2, 3);
        assert_eq!(first, second);
        assert_eq!(first.id, "review-2-3");
    }

    // Page parsing tests

    #[test]
    fn test_parse_page_positions_follow_document_order() {
        let page = make_page(
            &[
                make_card("First", "2023-01-01T00:00:00.000Z", "5", "/r/1", "a"),
                make_card("Second", "2023-01-02T00:00:00.000Z", "4", "/r/2", "b"),
                make_card("Third", "2023-01-03T00:00:00.000Z", "1", "/r/3", "c"),
            ],
            Some(7),
        );

        let parsed = Parser::new().parse_page(&page, PAGE_URL, 2);
        assert_eq!(parsed.reviews.len(), 3);
        assert_eq!(parsed.reviews[0].id, "review-2-1");
        assert_eq!(parsed.reviews[0].reviewer_name, "First");
        assert_eq!(parsed.reviews[1].id, "review-2-2");
        assert_eq!(parsed.reviews[2].id, "review-2-3");
        assert_eq!(parsed.reviews[2].reviewer_name, "Third");
        assert_eq!(parsed.last_page, Some(7));
    }

    #[test]
    fn test_parse_page_skips_cards_without_article() {
        let promo =
            r#"<div class="styles_cardWrapper__x"><div>promoted content, no article</div></div>"#;
        let page = make_page(
            &[
                promo.to_string(),
                make_card("Real", "2023-01-01T00:00:00.000Z", "5", "/r/1", "a"),
            ],
            None,
        );

        let parsed = Parser::new().parse_page(&page, PAGE_URL, 1);
        assert_eq!(parsed.reviews.len(), 1);
        assert_eq!(parsed.reviews[0].reviewer_name, "Real");
    }

    #[test]
    fn test_parse_page_empty_document() {
        let parsed = Parser::new().parse_page("<html><body></body></html>", PAGE_URL, 1);
        assert!(parsed.reviews.is_empty());
        assert_eq!(parsed.last_page, None);
    }

    #[test]
    fn test_parse_last_page_absent() {
        let page = make_page(&[make_card("A", "d", "5", "/r/1", "a")], None);
        let parsed = Parser::new().parse_page(&page, PAGE_URL, 1);
        assert_eq!(parsed.last_page, None);
    }

    #[test]
    fn test_parse_last_page_non_numeric() {
        let html = r#"<html><body>
            <a name="pagination-button-last" href="?page=next">Next</a>
        </body></html>"#;
        let parsed = Parser::new().parse_page(html, PAGE_URL, 1);
        assert_eq!(parsed.last_page, None);
    }

    #[test]
    fn test_parse_last_page_trims_whitespace() {
        let html = r#"<html><body>
            <a name="pagination-button-last" href="?page=12"> 12 </a>
        </body></html>"#;
        let parsed = Parser::new().parse_page(html, PAGE_URL, 1);
        assert_eq!(parsed.last_page, Some(12));
    }
}
