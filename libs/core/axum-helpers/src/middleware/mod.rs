//! HTTP middleware module.
//!
//! - Request logging
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::middleware::request_logger;
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(request_logger));
//! ```

pub mod logging;

pub use logging::request_logger;
