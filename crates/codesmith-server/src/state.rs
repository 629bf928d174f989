//! Application state shared across axum handlers.
//!
//! [`AppState`] wraps the store in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. Uses `tokio::sync::Mutex` (async-aware) instead of
//! `std::sync::Mutex` (blocking) so handlers await the lock without blocking
//! the tokio runtime. `SqliteStore` contains `rusqlite::Connection`, which is
//! `!Sync`, so a `Mutex` rather than an `RwLock` is required.
//!
//! The model client is injected at construction; handlers call it before
//! taking the store lock, so the lock is never held across a network await.

use std::sync::Arc;

use codesmith_storage::SqliteStore;

use crate::error::ApiError;
use crate::model::CodeModel;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared store (async Mutex -- non-blocking await).
    pub store: Arc<tokio::sync::Mutex<SqliteStore>>,
    /// The injected code-generation model client.
    pub model: Arc<dyn CodeModel>,
}

impl AppState {
    /// Creates a new `AppState` backed by the given SQLite database path.
    pub fn new(db_path: &str, model: Arc<dyn CodeModel>) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)?;
        Ok(AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            model,
        })
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory(model: Arc<dyn CodeModel>) -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()?;
        Ok(AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            model,
        })
    }
}
