//! Health check handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};

use crate::state::AppState;

/// Reports service and database health.
///
/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    let probe = store.ping();
    drop(store);

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    match probe {
        Ok(()) => Json(serde_json::json!({
            "status": "ok",
            "database": "connected",
            "timestamp": timestamp,
        }))
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "status": "error",
                "database": "disconnected",
                "error": err.to_string(),
            })),
        )
            .into_response(),
    }
}
