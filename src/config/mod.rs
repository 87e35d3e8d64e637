//! Configuration module for Quote-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file section falls back to its default, so an empty file (or no
//! file at all, via `Config::default()`) targets quotes.toscrape.com.
//!
//! # Example
//!
//! ```no_run
//! use quote_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Crawl starts at: {}{}", config.site.base_url, config.site.start_path);
//! ```

mod parser;
mod types;
pub(crate) mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, LoggingConfig, OutputConfig, SelectorConfig, SiteConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
