//! HTTP handler modules for the codesmith API.
//!
//! Handlers validate input, call the model client where needed, acquire the
//! store lock, and shape JSON responses. The model call always happens
//! before the store lock is taken.

pub mod generate;
pub mod health;
pub mod history;
