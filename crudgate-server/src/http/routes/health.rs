//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health - process is up; `database` reports whether a lease and ping succeed
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.db.acquire().await {
        Ok(mut conn) => match conn.ping().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::warn!(error = %e, "health ping failed");
                "down"
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "health check could not lease a connection");
            "down"
        }
    };

    Json(HealthResponse {
        status: if database == "up" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
