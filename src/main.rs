//! tp-reviews - Fast, stateless Trustpilot review scraper CLI
//!
//! Scrapes every review page for a product concurrently and persists the
//! result as a JSON document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tp_reviews::commands::ScrapeCommand;
use tp_reviews::config::{Config, OutputFormat};
use tp_reviews::format::Formatter;
use tp_reviews::trustpilot::CompanyReviews;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tp-reviews",
    version,
    about = "Fast, stateless Trustpilot review scraper CLI",
    long_about = "Scrapes every review page for a product concurrently and saves the reviews as a JSON document."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "TP_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all reviews for a product
    #[command(alias = "s")]
    Scrape {
        /// Product identifier as it appears in the review URL (e.g. acme.com)
        product: String,

        /// Maximum number of pages fetched concurrently
        #[arg(long, env = "TP_MAX_IN_FLIGHT")]
        max_in_flight: Option<usize>,

        /// Only fetch reviews in the site's default language
        #[arg(long)]
        domestic: bool,

        /// Output file for the JSON document
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scrape { product, max_in_flight, domestic, out } => {
            if let Some(limit) = max_in_flight {
                config.max_in_flight = limit;
            }
            if domestic {
                config.all_languages = false;
            }

            let cmd = ScrapeCommand::new(config.clone());
            let outcome = cmd.execute(&product).await?;

            let formatter = Formatter::new(config.format);
            println!("{}", formatter.format_reviews(&outcome.reviews));

            let out_path = out.unwrap_or_else(|| {
                PathBuf::from(format!("trustpilot_reviews_{}.json", product))
            });
            save_reviews(&out_path, &outcome.reviews)?;

            match outcome.error {
                None => {
                    info!("Successfully scraped {} reviews for {}", outcome.reviews.len(), product);
                    Ok(())
                }
                Some(err) => {
                    if outcome.reviews.is_empty() {
                        warn!("Scrape of {} failed with no reviews collected", product);
                    } else {
                        warn!(
                            "Scrape of {} is incomplete: {} reviews saved",
                            product,
                            outcome.reviews.len()
                        );
                    }
                    Err(err.into())
                }
            }
        }
    }
}

/// Writes the collection as a JSON document with a top-level `reviews` field.
fn save_reviews(path: &Path, reviews: &CompanyReviews) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    serde_json::to_writer_pretty(file, reviews)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Saved {} reviews to {}", reviews.len(), path.display());
    Ok(())
}
