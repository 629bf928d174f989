//! SQLite implementation of the generation store.
//!
//! [`SqliteStore`] persists language tags and generation records in a SQLite
//! database with WAL mode, transactions on every write, and automatic schema
//! migrations.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::StorageError;
use crate::types::{GenerationRecord, HistoryRow, LanguageTag};

/// SQLite-backed store for language tags and generation records.
///
/// Every write operation is wrapped in a transaction for atomicity.
/// The database uses WAL mode for performance and foreign keys for integrity.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Finds the language tag for `name`, creating it if absent.
    ///
    /// The canonical name is the lower-cased, trimmed input. The insert uses
    /// `ON CONFLICT DO NOTHING`, so concurrent requests for the same new
    /// language cannot create duplicate tags, and an existing tag (including
    /// its display name) is left unchanged.
    pub fn find_or_create_language(
        &mut self,
        name: &str,
        display_name: &str,
    ) -> Result<LanguageTag, StorageError> {
        let canonical = name.trim().to_lowercase();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO languages (id, name, display_name) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO NOTHING",
            params![Uuid::new_v4().to_string(), canonical, display_name],
        )?;

        let tag = tx
            .query_row(
                "SELECT id, name, display_name FROM languages WHERE name = ?1",
                params![canonical],
                |row| {
                    Ok(LanguageTag {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| StorageError::Integrity {
                reason: format!("language '{}' missing after upsert", canonical),
            })?;

        tx.commit()?;
        Ok(tag)
    }

    /// Persists a generation referencing `tag`.
    ///
    /// The denormalized `language` column is written from `tag.name`, which
    /// keeps it equal to the canonical name by construction.
    pub fn create_generation(
        &mut self,
        prompt: &str,
        code: &str,
        tag: &LanguageTag,
    ) -> Result<GenerationRecord, StorageError> {
        let record = GenerationRecord {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            code: code.to_string(),
            language: tag.name.clone(),
            language_id: tag.id.clone(),
            timestamp: now_rfc3339(),
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO generations (id, prompt, code, language, language_id, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.prompt,
                record.code,
                record.language,
                record.language_id,
                record.timestamp,
            ],
        )?;
        tx.commit()?;

        Ok(record)
    }

    /// Counts generations matching the optional canonical-language filter.
    pub fn count_generations(&self, language: Option<&str>) -> Result<u64, StorageError> {
        let count: i64 = match language {
            Some(lang) => self.conn.query_row(
                "SELECT COUNT(*) FROM generations WHERE language = ?1",
                params![lang],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM generations", [], |row| row.get(0))?,
        };
        Ok(count as u64)
    }

    /// Lists a page of generations, most recent first.
    ///
    /// Ordering is by timestamp descending with the insertion counter as
    /// tiebreaker, so repeated calls with identical filters paginate
    /// deterministically. Rows are joined with the languages table so each
    /// carries the display name.
    pub fn list_generations(
        &self,
        language: Option<&str>,
        skip: u64,
        take: u64,
    ) -> Result<Vec<HistoryRow>, StorageError> {
        let mut sql = String::from(
            "SELECT g.id, g.prompt, g.code, COALESCE(l.display_name, g.language), g.timestamp
             FROM generations g
             LEFT JOIN languages l ON l.id = g.language_id",
        );
        if language.is_some() {
            sql.push_str(" WHERE g.language = ?3");
        }
        sql.push_str(" ORDER BY g.timestamp DESC, g.seq DESC LIMIT ?1 OFFSET ?2");

        // SQLite binds LIMIT/OFFSET as i64; a saturated u64 offset clamps to
        // i64::MAX, which is past the end of any result set.
        let take = i64::try_from(take).unwrap_or(i64::MAX);
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(HistoryRow {
                id: row.get(0)?,
                prompt: row.get(1)?,
                code: row.get(2)?,
                language: row.get(3)?,
                timestamp: row.get(4)?,
            })
        };

        let rows = match language {
            Some(lang) => stmt
                .query_map(params![take, skip, lang], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map(params![take, skip], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(rows)
    }

    /// Probes the database connection (used by the health endpoint).
    pub fn ping(&self) -> Result<(), StorageError> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Returns the current UTC timestamp in RFC 3339 format.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
