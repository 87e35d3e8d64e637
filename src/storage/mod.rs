//! Storage module for archiving crawl results
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Run tracking (when, with which config, how it ended)
//! - Quote persistence, optionally with author details

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{QuoteStore, StorageError, StorageResult};

use crate::crawler::{EnrichedQuote, QuoteRecord};
use crate::ScoutError;

use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScoutError> {
    SqliteStorage::new(path)
}

/// Stores plain quotes under `run_id`, in order
pub fn store_quotes<S: QuoteStore>(
    store: &mut S,
    run_id: i64,
    quotes: &[QuoteRecord],
) -> StorageResult<()> {
    for (position, quote) in quotes.iter().enumerate() {
        store.insert_quote(run_id, position, quote, None)?;
    }
    Ok(())
}

/// Stores enriched quotes under `run_id`, in order
pub fn store_enriched<S: QuoteStore>(
    store: &mut S,
    run_id: i64,
    quotes: &[EnrichedQuote],
) -> StorageResult<()> {
    for (position, enriched) in quotes.iter().enumerate() {
        store.insert_quote(run_id, position, &enriched.quote, Some(&enriched.author))?;
    }
    Ok(())
}

/// Represents a crawl run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub quote_count: i64,
}

/// Represents a stored quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuote {
    pub id: i64,
    pub run_id: i64,
    pub position: i64,
    pub text: String,
    pub author: String,
    pub bio_link: String,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
}

/// Status of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    /// Every listing page was walked
    Completed,
    /// The crawl stopped early on a failed fetch
    Partial,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Partial => "partial",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }
}
