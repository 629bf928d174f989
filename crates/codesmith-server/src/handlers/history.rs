//! Generation history handler.

use axum::extract::{Query, State};
use axum::Json;

use codesmith_core::{PageMeta, PageParams};

use crate::error::ApiError;
use crate::schema::history::{HistoryItem, HistoryQuery, HistoryResponse};
use crate::state::AppState;

/// Lists persisted generations, most recent first.
///
/// `GET /api/history?page&limit&language`
///
/// Invalid pagination inputs are corrected, never rejected; the only failure
/// mode is storage unavailability.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let params = PageParams::from_raw(
        query.page.as_deref(),
        query.limit.as_deref(),
        query.language.as_deref(),
    );

    let store = state.store.lock().await;
    let total_count = store.count_generations(params.language.as_deref())?;
    let rows = store.list_generations(params.language.as_deref(), params.skip(), params.limit)?;
    drop(store);

    let meta = PageMeta::compute(&params, total_count);

    Ok(Json(HistoryResponse {
        success: true,
        data: rows.into_iter().map(HistoryItem::from).collect(),
        pagination: meta.into(),
    }))
}
