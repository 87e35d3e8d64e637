//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the QuoteStore trait.

use crate::crawler::{AuthorDetails, QuoteRecord};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{QuoteStore, StorageError, StorageResult};
use crate::storage::{RunRecord, RunStatus, StoredQuote};
use crate::ScoutError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScoutError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScoutError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, ScoutError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
            .unwrap_or(RunStatus::Running),
        quote_count: row.get(5)?,
    })
}

impl QuoteStore for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        quote_count: usize,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, quote_count = ?3 WHERE id = ?4",
            params![status.to_db_string(), now, quote_count as i64, run_id],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        self.conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, status, quote_count
                 FROM runs WHERE id = ?1",
                params![run_id],
                run_from_row,
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let run = self
            .conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, status, quote_count
                 FROM runs ORDER BY id DESC LIMIT 1",
                [],
                run_from_row,
            )
            .optional()?;

        Ok(run)
    }

    // ===== Quotes =====

    fn insert_quote(
        &mut self,
        run_id: i64,
        position: usize,
        quote: &QuoteRecord,
        author: Option<&AuthorDetails>,
    ) -> StorageResult<i64> {
        let (birth_date, birth_place) = match author {
            Some(details) => (details.birth_date.as_deref(), details.birth_place.as_deref()),
            None => (None, None),
        };

        self.conn.execute(
            "INSERT INTO quotes (run_id, position, text, author, bio_link, birth_date, birth_place)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                run_id,
                position as i64,
                quote.text,
                quote.author,
                quote.bio_link,
                birth_date,
                birth_place
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn quotes_for_run(&self, run_id: i64) -> StorageResult<Vec<StoredQuote>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, position, text, author, bio_link, birth_date, birth_place
             FROM quotes WHERE run_id = ?1 ORDER BY position",
        )?;

        let quotes = stmt
            .query_map(params![run_id], |row| {
                Ok(StoredQuote {
                    id: row.get(0)?,
                    run_id: row.get(1)?,
                    position: row.get(2)?,
                    text: row.get(3)?,
                    author: row.get(4)?,
                    bio_link: row.get(5)?,
                    birth_date: row.get(6)?,
                    birth_place: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quotes)
    }
}
