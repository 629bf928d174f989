//! History pagination: raw query-parameter normalization and metadata.
//!
//! The history endpoint never rejects pagination input. Missing, non-numeric,
//! or out-of-range values are corrected to sane defaults ([`PageParams`]),
//! and the response metadata ([`PageMeta`]) is computed so that its four
//! fields are always internally consistent, including for pages past the end
//! of the result set.

use serde::{Deserialize, Serialize};

/// Page number used when the input is missing or invalid.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the input is missing or invalid.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound on page size.
pub const MAX_LIMIT: u64 = 100;

/// Normalized history query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number (always >= 1).
    pub page: u64,
    /// Page size (always in 1..=[`MAX_LIMIT`]).
    pub limit: u64,
    /// Optional exact-match language filter, lower-cased.
    pub language: Option<String>,
}

impl PageParams {
    /// Normalizes raw (possibly absent or malformed) query parameters.
    ///
    /// - `page` defaults to 1 when missing or non-numeric, and is clamped
    ///   up to 1.
    /// - `limit` defaults to 10 when missing or non-numeric, and is clamped
    ///   into `[1, 100]`.
    /// - `language` is trimmed and lower-cased; an empty filter is treated
    ///   as absent.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, language: Option<&str>) -> Self {
        let page = page
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|p| p.max(1) as u64)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|l| l.clamp(1, MAX_LIMIT as i64) as u64)
            .unwrap_or(DEFAULT_LIMIT);
        let language = language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty());

        PageParams { page, limit, language }
    }

    /// Number of records to skip before the requested page.
    ///
    /// Saturates rather than overflowing for absurdly large pages; such a
    /// page is simply past the end of any result set.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned alongside a page of history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// The (normalized) requested page.
    pub page: u64,
    /// The (normalized) page size.
    pub limit: u64,
    /// Records matching the filter, ignoring pagination.
    pub total_count: u64,
    /// `ceil(total_count / limit)`; 0 when there are no matches.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Computes metadata for `total_count` matching records.
    ///
    /// A page past the end yields `has_next_page = false` while keeping all
    /// counts non-negative and consistent.
    pub fn compute(params: &PageParams, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(params.limit);
        PageMeta {
            page: params.page,
            limit: params.limit,
            total_count,
            total_pages,
            has_next_page: params.page < total_pages,
            has_previous_page: params.page > 1,
        }
    }
}
