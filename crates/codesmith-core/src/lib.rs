//! Pure transformation logic for the codesmith service.
//!
//! This crate has no I/O. It holds the two pieces of logic that the HTTP
//! and storage layers are built around:
//!
//! - [`normalize`]: markdown fence stripping applied to raw model output
//! - [`paginate`]: history query parameter normalization and pagination
//!   metadata

pub mod normalize;
pub mod paginate;

// Re-export commonly used items
pub use normalize::normalize_code;
pub use paginate::{PageMeta, PageParams, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
