//! HTML parser for listing pages and author pages
//!
//! This module turns raw markup into records:
//! - Quote records from every quote element on a listing page
//! - The `href` of the "next page" link, if the page has one
//! - Birth date and place from an author page
//!
//! Elements are located by CSS selector, never by position. A quote element
//! that lacks any of its parts is skipped on its own; its siblings are kept.

use crate::config::validation::compile_selector;
use crate::config::SelectorConfig;
use crate::crawler::record::{AuthorDetails, QuoteRecord};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// An expected element (or attribute) was not found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("missing {0}")]
    Missing(&'static str),
}

/// Compiled selectors for both page kinds
#[derive(Debug, Clone)]
pub struct PageSelectors {
    quote: Selector,
    text: Selector,
    author: Selector,
    bio_link: Selector,
    next: Selector,
    next_link: Selector,
    born_date: Selector,
    born_location: Selector,
}

impl PageSelectors {
    /// Compiles every selector in the configuration
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            quote: compile_selector("quote", &config.quote)?,
            text: compile_selector("text", &config.text)?,
            author: compile_selector("author", &config.author)?,
            bio_link: compile_selector("bio-link", &config.bio_link)?,
            next: compile_selector("next", &config.next)?,
            next_link: compile_selector("next-link", &config.next_link)?,
            born_date: compile_selector("born-date", &config.born_date)?,
            born_location: compile_selector("born-location", &config.born_location)?,
        })
    }
}

/// Everything extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Well-formed quotes in document order
    pub quotes: Vec<QuoteRecord>,

    /// Number of quote elements skipped as malformed
    pub skipped: usize,

    /// Raw `href` of the next page link
    pub next_href: Option<String>,
}

/// Parses a listing page
///
/// # Example
///
/// ```
/// use quote_scout::config::SelectorConfig;
/// use quote_scout::crawler::{parse_listing, PageSelectors};
///
/// let html = r#"<div class="quote">
///     <span class="text">"Hello"</span>
///     <small class="author">Someone</small>
///     <a href="/author/Someone">(about)</a>
/// </div>
/// <li class="next"><a href="/page/2/">Next</a></li>"#;
/// let selectors = PageSelectors::from_config(&SelectorConfig::default()).unwrap();
/// let page = parse_listing(html, &selectors);
/// assert_eq!(page.quotes[0].author, "Someone");
/// assert_eq!(page.next_href.as_deref(), Some("/page/2/"));
/// ```
pub fn parse_listing(html: &str, selectors: &PageSelectors) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for element in document.select(&selectors.quote) {
        match extract_quote(element, selectors) {
            Ok(quote) => page.quotes.push(quote),
            Err(e) => {
                tracing::warn!("Skipping a malformed quote: {}", e);
                page.skipped += 1;
            }
        }
    }

    page.next_href = find_next_href(&document, selectors);
    page
}

/// Extracts one quote record from a quote element
pub fn extract_quote(
    element: ElementRef<'_>,
    selectors: &PageSelectors,
) -> Result<QuoteRecord, ExtractError> {
    let text = first_text(element, &selectors.text).ok_or(ExtractError::Missing("text"))?;
    let author = first_text(element, &selectors.author).ok_or(ExtractError::Missing("author"))?;
    let bio_link = element
        .select(&selectors.bio_link)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or(ExtractError::Missing("bio link"))?;

    Ok(QuoteRecord {
        text,
        author,
        bio_link: bio_link.to_string(),
    })
}

/// Finds the `href` inside the "next" wrapper
///
/// A wrapper with no link child counts as no next page.
pub fn find_next_href(document: &Html, selectors: &PageSelectors) -> Option<String> {
    document
        .select(&selectors.next)
        .next()?
        .select(&selectors.next_link)
        .next()?
        .value()
        .attr("href")
        .map(str::to_string)
}

/// Parses an author page
///
/// Fails if either fact is missing; a page never yields just one of them.
pub fn parse_author(html: &str, selectors: &PageSelectors) -> Result<AuthorDetails, ExtractError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let birth_date =
        first_text(root, &selectors.born_date).ok_or(ExtractError::Missing("birth date"))?;
    let birth_place =
        first_text(root, &selectors.born_location).ok_or(ExtractError::Missing("birth place"))?;

    Ok(AuthorDetails::new(birth_date, birth_place))
}

/// Text of the first matching descendant
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(stripped_text)
}

/// Joins the element's text nodes, each trimmed, dropping empty ones
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
