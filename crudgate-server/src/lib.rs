//! crudgate-server: HTTP data-access gateway
//!
//! Maps each request to one parameterized statement (or one update-else-insert
//! pair) on a pooled connection and answers with a uniform JSON envelope.
//! Also proxies `GET /say` to an external text generator.

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod http;
pub mod models;
pub mod proxy;

pub use config::{ConfigError, GatewayConfig};
pub use envelope::{Envelope, Reply, Status};
pub use error::{GatewayError, GatewayResult};
pub use http::{build_router, run_server, serve, AppState, RouterOptions, ServerError};
