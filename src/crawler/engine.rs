//! Crawl engine - pagination loop and author lookups
//!
//! The listing crawl is a small state machine over the URL of the page to
//! fetch next:
//!
//! ```text
//!   Fetch(start) --fetch ok, next link--> Fetch(next) --...--> Done(Exhausted)
//!        |                                     |
//!        +------------- fetch failed ----------+--> Done(FetchFailed)
//! ```
//!
//! Pages are only ever reached through the previous page's "next" link. The
//! site's pagination is assumed to be acyclic, so visited URLs are not
//! tracked; a site whose "next" links loop would be crawled forever.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_author, parse_listing, PageSelectors};
use crate::crawler::record::{AuthorDetails, EnrichedQuote, QuoteRecord};
use crate::ConfigError;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{Instrument, Span};
use url::Url;

/// Where the crawl goes next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// Fetch and parse this listing page
    Fetch(Url),
    /// Terminal state
    Done(StopReason),
}

/// Why a crawl ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no "next" link
    Exhausted,
    /// A page fetch failed; later pages were not attempted
    FetchFailed { url: String },
    /// A "next" link could not be resolved against the base URL
    InvalidLink { href: String },
}

/// Outcome of one full crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Every extracted quote, in page-then-document order
    pub quotes: Vec<QuoteRecord>,
    /// Listing pages fetched successfully
    pub pages_fetched: usize,
    /// Quote elements skipped as malformed
    pub skipped_records: usize,
    pub stop: StopReason,
}

impl CrawlReport {
    /// An empty report, before the first page
    pub fn new() -> Self {
        Self {
            quotes: Vec::new(),
            pages_fetched: 0,
            skipped_records: 0,
            stop: StopReason::Exhausted,
        }
    }

    /// Whether the crawl walked every page
    pub fn is_complete(&self) -> bool {
        self.stop == StopReason::Exhausted
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a paginated quotes site through a [`PageFetcher`]
pub struct CrawlEngine<F> {
    fetcher: F,
    base_url: Url,
    start_url: Url,
    page_delay: Duration,
    selectors: PageSelectors,
    span: Span,
}

impl<F: PageFetcher> CrawlEngine<F> {
    /// Creates an engine for the configured site
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Ready to crawl
    /// * `Err(ConfigError)` - Base URL, start path, or a selector is invalid
    pub fn new(config: &Config, fetcher: F) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        let start_url = base_url
            .join(&config.site.start_path)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-path: {}", e)))?;
        let selectors = PageSelectors::from_config(&config.selectors)?;
        let span = tracing::info_span!("crawl", site = %base_url);

        Ok(Self {
            fetcher,
            base_url,
            start_url,
            page_delay: Duration::from_millis(config.crawler.page_delay_ms),
            selectors,
            span,
        })
    }

    #[cfg(test)]
    fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The state every crawl starts from
    pub fn initial_state(&self) -> CrawlState {
        CrawlState::Fetch(self.start_url.clone())
    }

    /// Crawls every listing page and returns the quotes found
    ///
    /// Never fails: a fetch failure ends the crawl early and the quotes
    /// gathered up to that point are returned.
    pub async fn crawl_all_quotes(&self) -> Vec<QuoteRecord> {
        self.crawl_with_report().await.quotes
    }

    /// Crawls every listing page, reporting how the crawl ended
    pub async fn crawl_with_report(&self) -> CrawlReport {
        async {
            let mut report = CrawlReport::new();
            let mut state = self.initial_state();

            while let CrawlState::Fetch(url) = state {
                state = self.step(&url, &mut report).await;
            }

            if let CrawlState::Done(reason) = state {
                report.stop = reason;
            }

            tracing::info!(
                "Crawl finished: {} quotes from {} pages ({} skipped), stop reason: {:?}",
                report.quotes.len(),
                report.pages_fetched,
                report.skipped_records,
                report.stop
            );
            report
        }
        .instrument(self.span.clone())
        .await
    }

    /// Processes one listing page and returns the next state
    ///
    /// The inter-page delay is applied after every successfully fetched
    /// page, including the last one. Logs here carry the engine's span only
    /// when driven from `crawl_with_report`.
    pub(crate) async fn step(&self, url: &Url, report: &mut CrawlReport) -> CrawlState {
        tracing::info!("Scraping {}", url);

        let html = match self.fetcher.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(failure) => {
                tracing::error!("Skipping {} due to fetch failure: {}", url, failure.message);
                return CrawlState::Done(StopReason::FetchFailed {
                    url: url.to_string(),
                });
            }
        };
        report.pages_fetched += 1;

        let page = parse_listing(&html, &self.selectors);
        tracing::debug!(
            "Extracted {} quotes from {} ({} skipped)",
            page.quotes.len(),
            url,
            page.skipped
        );
        report.skipped_records += page.skipped;
        report.quotes.extend(page.quotes);

        let next = match page.next_href {
            None => CrawlState::Done(StopReason::Exhausted),
            Some(href) => match self.base_url.join(&href) {
                Ok(next_url) => CrawlState::Fetch(next_url),
                Err(e) => {
                    tracing::error!("Cannot resolve next link '{}' from {}: {}", href, url, e);
                    CrawlState::Done(StopReason::InvalidLink { href })
                }
            },
        };

        tokio::time::sleep(self.page_delay).await;
        next
    }

    /// Looks up birth date and place for one author
    ///
    /// Returns the absent/absent pair if the page cannot be fetched or if
    /// either fact is missing from it.
    pub async fn fetch_author_details(&self, bio_link: &str) -> AuthorDetails {
        async {
            let url = match self.base_url.join(bio_link) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!("Cannot resolve bio link '{}': {}", bio_link, e);
                    return AuthorDetails::absent();
                }
            };

            let html = match self.fetcher.fetch(url.as_str()).await {
                Ok(html) => html,
                Err(_) => {
                    tracing::error!("Could not fetch author details from {}", url);
                    return AuthorDetails::absent();
                }
            };

            match parse_author(&html, &self.selectors) {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!("Could not extract author details from {}: {}", url, e);
                    AuthorDetails::absent()
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Attaches author details to each quote, in order
    ///
    /// Each distinct bio link is fetched once; later quotes by the same
    /// author reuse the first result.
    pub async fn enrich_quotes(&self, quotes: &[QuoteRecord]) -> Vec<EnrichedQuote> {
        let mut cache: HashMap<&str, AuthorDetails> = HashMap::new();
        let mut enriched = Vec::with_capacity(quotes.len());

        for quote in quotes {
            let author = match cache.get(quote.bio_link.as_str()) {
                Some(details) => details.clone(),
                None => {
                    let details = self.fetch_author_details(&quote.bio_link).await;
                    cache.insert(quote.bio_link.as_str(), details.clone());
                    details
                }
            };
            enriched.push(EnrichedQuote {
                quote: quote.clone(),
                author,
            });
        }

        enriched
    }
}
