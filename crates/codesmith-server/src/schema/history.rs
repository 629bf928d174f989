//! History request/response types.

use codesmith_core::PageMeta;
use codesmith_storage::HistoryRow;
use serde::{Deserialize, Serialize};

/// Raw history query parameters.
///
/// All fields arrive as optional strings; normalization (defaults, clamping,
/// lower-casing) happens in `codesmith_core::paginate`, never by rejecting
/// the request.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response for a history page.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// Always `true` for successful responses.
    pub success: bool,
    /// The page of records, most recent first.
    pub data: Vec<HistoryItem>,
    /// Pagination metadata, consistent even past the last page.
    pub pagination: PaginationInfo,
}

/// A single history record on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryItem {
    pub id: String,
    pub prompt: String,
    pub code: String,
    /// Display name of the language tag.
    pub language: String,
    pub timestamp: String,
}

impl From<HistoryRow> for HistoryItem {
    fn from(row: HistoryRow) -> Self {
        HistoryItem {
            id: row.id,
            prompt: row.prompt,
            code: row.code,
            language: row.language,
            timestamp: row.timestamp,
        }
    }
}

/// Pagination metadata on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PageMeta> for PaginationInfo {
    fn from(meta: PageMeta) -> Self {
        PaginationInfo {
            page: meta.page,
            limit: meta.limit,
            total_count: meta.total_count,
            total_pages: meta.total_pages,
            has_next_page: meta.has_next_page,
            has_previous_page: meta.has_previous_page,
        }
    }
}
