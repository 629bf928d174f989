//! API schema types for request/response definitions.
//!
//! Each sub-module defines the response types for a specific API domain.
//! Types use serde derives for JSON serialization; wire field names are
//! camelCase per the public API contract.

pub mod generate;
pub mod history;
