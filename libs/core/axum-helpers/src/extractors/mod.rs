//! Custom extractors for Axum handlers.
//!
//! Thin wrappers over axum's `Json` and `Query` whose rejections are
//! [`AppError`](crate::errors::AppError)s, so malformed input is reported
//! with the same `{ "error": message }` envelope as every other failure.

pub mod json;
pub mod query;

pub use json::JsonBody;
pub use query::QueryParams;
