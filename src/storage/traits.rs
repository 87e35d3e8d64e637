//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::crawler::{AuthorDetails, QuoteRecord};
use crate::storage::{RunRecord, RunStatus, StoredQuote};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Storage is an archive of finished crawls; nothing stored here is read
/// back to resume or shorten a later crawl.
pub trait QuoteStore {
    // ===== Run Management =====

    /// Creates a new crawl run in the `running` state
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration the run used
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Records the final status and quote count of a run
    fn finish_run(&mut self, run_id: i64, status: RunStatus, quote_count: usize)
        -> StorageResult<()>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    // ===== Quotes =====

    /// Stores one quote at `position` within the run
    fn insert_quote(
        &mut self,
        run_id: i64,
        position: usize,
        quote: &QuoteRecord,
        author: Option<&AuthorDetails>,
    ) -> StorageResult<i64>;

    /// Gets all quotes of a run in crawl order
    fn quotes_for_run(&self, run_id: i64) -> StorageResult<Vec<StoredQuote>>;
}
