//! HTTP server layer
//!
//! Axum server with:
//! - CORS (any origin by default, localhost only on request)
//! - Request tracing and an end-to-end request timeout
//! - Graceful shutdown
//! - One JSON reply per request (see [`crate::envelope`])

pub mod extractors;
pub mod routes;
pub mod server;

pub use server::{build_router, run_server, serve, AppState, RouterOptions, ServerError};
