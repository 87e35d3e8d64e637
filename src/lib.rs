//! Quote-Scout: a polite quotation harvester
//!
//! This crate walks a paginated quotations site page by page, extracting
//! quote records from each listing page and following the "next" link until
//! the site runs out of pages. Author detail pages can be looked up on demand
//! to enrich each record with biographical data.

pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for Quote-Scout operations
///
/// The crawl itself never fails: fetch and extraction problems are absorbed
/// by the engine. These errors come from startup and persistence.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}' for {field}")]
    InvalidSelector { field: &'static str, selector: String },
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{AuthorDetails, CrawlEngine, HttpFetcher, PageFetcher, QuoteRecord};
