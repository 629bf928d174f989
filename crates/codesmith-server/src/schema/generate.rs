//! Generation response types.

use serde::Serialize;

/// Response for a successful generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Always `true` for successful responses.
    pub success: bool,
    /// Normalized generated code.
    pub code: String,
    /// The language as submitted by the caller.
    pub language: String,
    /// The prompt as submitted by the caller.
    pub prompt: String,
    /// Opaque identifier of the persisted record.
    pub generation_id: String,
    /// ISO 8601 creation timestamp.
    pub timestamp: String,
}
