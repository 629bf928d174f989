//! SQLite persistence for codesmith generations.
//!
//! Provides [`SqliteStore`], the single storage backend for language tags and
//! generation records. Writes are transactional; language-tag uniqueness is
//! enforced by a unique constraint plus conflict-do-nothing upsert rather
//! than read-then-write in application code.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: LanguageTag, GenerationRecord, HistoryRow row types
//! - [`schema`]: SQL schema constants and migration setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod schema;
pub mod sqlite;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use sqlite::SqliteStore;
pub use types::{GenerationRecord, HistoryRow, LanguageTag};
