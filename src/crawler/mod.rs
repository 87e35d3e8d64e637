//! Crawler module for quote harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML parsing of listing and author pages
//! - The pagination loop and author detail lookups

mod engine;
mod fetcher;
mod parser;
mod record;

pub use engine::{CrawlEngine, CrawlReport, CrawlState, StopReason};
pub use fetcher::{build_http_client, FetchFailure, HttpFetcher, PageFetcher};
pub use parser::{
    extract_quote, find_next_href, parse_author, parse_listing, ExtractError, ListingPage,
    PageSelectors,
};
pub use record::{AuthorDetails, EnrichedQuote, QuoteRecord};

use crate::config::Config;
use crate::ScoutError;

/// Crawls the configured site over HTTP and returns every quote found
///
/// This is the main entry point for a one-shot crawl. It builds the HTTP
/// fetcher and the engine from `config`, then walks every listing page.
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran (possibly stopping early on a fetch failure)
/// * `Err(ScoutError)` - The fetcher or engine could not be built
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScoutError> {
    let fetcher = HttpFetcher::new(config)?;
    let engine = CrawlEngine::new(config, fetcher)?;
    Ok(engine.crawl_with_report().await)
}
