//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod cors;
pub(crate) mod handlers;
mod rate_limit;
mod server;

pub use handlers::{ApiError, AppState};
pub use rate_limit::RateLimiterState;
pub use server::{CHECKOUT_PATH, HttpServer, LEGACY_CHECKOUT_PATH};
