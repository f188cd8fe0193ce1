//! Output formatting for collected reviews (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::trustpilot::models::{CompanyReviews, Review};

/// Formats review collections for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a review collection.
    pub fn format_reviews(&self, reviews: &CompanyReviews) -> String {
        if reviews.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json_reviews(reviews),
                OutputFormat::Csv => self.csv_header(),
                _ => "No reviews found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_reviews(reviews),
            OutputFormat::Table => self.table_reviews(&reviews.reviews),
            OutputFormat::Markdown => self.markdown_reviews(&reviews.reviews),
            OutputFormat::Csv => self.csv_reviews(&reviews.reviews),
        }
    }

    // JSON formatting

    fn json_reviews(&self, reviews: &CompanyReviews) -> String {
        serde_json::to_string_pretty(reviews).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_reviews(&self, reviews: &[Review]) -> String {
        let id_width = 14;
        let rating_width = 6;
        let date_width = 10;
        let name_width = 20;
        let content_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<id_width$}  {:<rating_width$}  {:<date_width$}  {:<name_width$}  {}",
            "ID", "Rating", "Date", "Reviewer", "Content"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<rating_width$}  {:-<date_width$}  {:-<name_width$}  {:-<content_width$}",
            "", "", "", "", ""
        ));

        // Rows
        for review in reviews {
            // The datetime attribute starts with the calendar date
            let date: String = review.date.chars().take(date_width).collect();

            lines.push(format!(
                "{:<id_width$}  {:<rating_width$}  {:<date_width$}  {:<name_width$}  {}",
                review.id,
                review.rating,
                date,
                truncate(&review.reviewer_name, name_width),
                truncate(&review.content, content_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} reviews", reviews.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_reviews(&self, reviews: &[Review]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Rating | Date | Reviewer | Content |".to_string());
        lines.push("|----|--------|------|----------|---------|".to_string());

        for review in reviews {
            let date: String = review.date.chars().take(10).collect();
            let content = truncate(&review.content, 60).replace('|', "\\|");
            let name = review.reviewer_name.replace('|', "\\|");

            let content_cell = if review.link.is_empty() {
                content
            } else {
                format!("[{}]({})", content, review.link)
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                review.id, review.rating, date, name, content_cell
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} reviews found*", reviews.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,reviewer_name,rating,date,link,content".to_string()
    }

    fn csv_reviews(&self, reviews: &[Review]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for review in reviews {
            let name = Self::csv_escape(&review.reviewer_name);
            let content = Self::csv_escape(&review.content);
            let link = Self::csv_escape(&review.link);

            lines.push(format!(
                "{},{},{},{},{},{}",
                review.id, name, review.rating, review.date, link, content
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Char-safe truncation with a trailing ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
