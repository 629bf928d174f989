//! Storage-layer row types.
//!
//! Identifiers are opaque UUID strings minted at insert time; timestamps are
//! RFC 3339 UTC strings. Both are storage concerns -- rows only gain identity
//! when persisted.

use serde::{Deserialize, Serialize};

/// A language tag: canonical lowercase name plus human-readable display name.
///
/// Unique by canonical name. Created lazily on first use of a new language
/// string; existing tags are never modified by the upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTag {
    /// Opaque unique identifier.
    pub id: String,
    /// Canonical lowercase name (e.g. "python").
    pub name: String,
    /// Display name as first submitted (e.g. "Python").
    pub display_name: String,
}

/// A persisted generation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// The prompt the user submitted.
    pub prompt: String,
    /// Normalized generated code.
    pub code: String,
    /// Denormalized canonical language name; always equals the referenced
    /// tag's `name`.
    pub language: String,
    /// The referenced [`LanguageTag`] id.
    pub language_id: String,
    /// RFC 3339 UTC creation timestamp.
    pub timestamp: String,
}

/// A history listing row: a generation joined with its language display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Opaque generation identifier.
    pub id: String,
    /// The prompt the user submitted.
    pub prompt: String,
    /// Normalized generated code.
    pub code: String,
    /// Display name of the language tag (falls back to the denormalized
    /// canonical name if the tag row is missing).
    pub language: String,
    /// RFC 3339 UTC creation timestamp.
    pub timestamp: String,
}
