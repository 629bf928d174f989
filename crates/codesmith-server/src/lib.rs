//! HTTP/JSON API server for prompt-to-code generation with persisted history.
//!
//! Accepts a natural-language prompt plus a target language, delegates
//! generation to a hosted model behind the [`model::CodeModel`] trait,
//! normalizes the raw response, persists the result, and serves paginated
//! generation history. This crate contains the server framework, API schema
//! types, error handling, and route definitions.

pub mod error;
pub mod handlers;
pub mod model;
pub mod router;
pub mod schema;
pub mod state;
