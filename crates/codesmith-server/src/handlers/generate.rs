//! Code generation handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use codesmith_core::normalize_code;

use crate::error::ApiError;
use crate::model::code_prompt;
use crate::schema::generate::GenerateResponse;
use crate::state::AppState;

/// Generates code for a prompt and persists the result.
///
/// `POST /generate`
///
/// The body is validated by hand (rather than via a typed extractor), and
/// the extractor rejection is mapped explicitly, so malformed JSON, missing
/// fields, and wrong-typed fields all produce the uniform
/// `{success: false, error}` shape before any model or storage call is made.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let prompt = require_string_field(&body, "prompt", "Prompt")?;
    let language = require_string_field(&body, "language", "Language")?;

    let raw = state.model.generate(&code_prompt(&language, &prompt)).await?;
    let code = normalize_code(&raw);
    if code.is_empty() {
        // Raw output was empty or was only fences; nothing is persisted.
        return Err(ApiError::GenerationFailed(
            "model produced no usable code".to_string(),
        ));
    }

    let mut store = state.store.lock().await;
    let tag = store.find_or_create_language(&language, &language)?;
    let record = store.create_generation(&prompt, &code, &tag)?;
    drop(store);

    tracing::info!(
        generation_id = %record.id,
        language = %tag.name,
        "generation persisted"
    );

    Ok(Json(GenerateResponse {
        success: true,
        code: record.code,
        language,
        prompt,
        generation_id: record.id,
        timestamp: record.timestamp,
    }))
}

/// Extracts a required non-empty string field from the request body.
fn require_string_field(
    body: &serde_json::Value,
    key: &str,
    label: &str,
) -> Result<String, ApiError> {
    body.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::BadRequest(format!("{} is required and must be a string", label))
        })
}
