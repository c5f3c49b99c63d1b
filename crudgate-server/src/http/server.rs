//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS by default, localhost-only when configured
//! - Tracing middleware and a request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C, closing the pool afterwards

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{ConfigError, GatewayConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::db::{Database, PgDatabase, PoolError};
use crate::proxy::{HttpTextGenerator, ProxyError, TextGenerator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Process-wide connection pool
    pub db: Arc<dyn Database>,
    /// Upstream for `GET /say`
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { db, generator }
    }
}

/// Middleware settings for [`build_router`]
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub cors_permissive: bool,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_permissive: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl From<&GatewayConfig> for RouterOptions {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            cors_permissive: config.cors_permissive,
            request_timeout: config.request_timeout,
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let cors = if options.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::docs::router())
        .merge(routes::company::router())
        .merge(routes::customers::router())
        .merge(routes::foods::router())
        .merge(routes::students::router())
        .merge(routes::say::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            options.request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the gateway against PostgreSQL.
///
/// The pool connects lazily: the server comes up even if the database is
/// unreachable, and database routes answer 503 until it is back.
///
/// # Example
///
/// ```ignore
/// run_server(GatewayConfig::default()).await?;
/// ```
pub async fn run_server(config: GatewayConfig) -> Result<(), ServerError> {
    let db = PgDatabase::connect_lazy(&config.pool)?;
    tracing::info!(
        max_connections = config.pool.max_connections,
        acquire_timeout_secs = config.pool.acquire_timeout.as_secs(),
        "PostgreSQL pool configured"
    );
    serve(config, Arc::new(db)).await
}

/// Run the gateway against any [`Database`] until a shutdown signal.
pub async fn serve(config: GatewayConfig, db: Arc<dyn Database>) -> Result<(), ServerError> {
    config.validate()?;
    let addr = config.bind_addr()?;

    let generator = HttpTextGenerator::new(config.say_url.clone(), config.proxy_timeout)?;
    let state = AppState::new(Arc::clone(&db), Arc::new(generator));
    let app = build_router(state, &RouterOptions::from(&config));

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
    }

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("proxy client error: {0}")]
    Proxy(#[from] ProxyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::db::MemoryDatabase;
    use crate::proxy::MockTextGenerator;

    fn app() -> Router {
        let state = AppState::new(
            Arc::new(MemoryDatabase::sample()),
            Arc::new(MockTextGenerator::new()),
        );
        build_router(state, &RouterOptions::default())
    }

    #[test]
    fn router_options_follow_config() {
        let config = GatewayConfig {
            cors_permissive: false,
            ..GatewayConfig::default()
        };
        let options = RouterOptions::from(&config);
        assert!(!options.cors_permissive);
        assert_eq!(options.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn permissive_cors_answers_any_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/foods")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").map(|v| v.as_bytes()),
            Some(&b"*"[..])
        );
    }

    #[tokio::test]
    async fn localhost_cors_only_answers_local_origins() {
        let state = AppState::new(
            Arc::new(MemoryDatabase::sample()),
            Arc::new(MockTextGenerator::new()),
        );
        let app = build_router(
            state,
            &RouterOptions {
                cors_permissive: false,
                ..RouterOptions::default()
            },
        );

        let allowed_origin = |origin: &'static str| {
            let app = app.clone();
            async move {
                let response = app
                    .oneshot(
                        Request::builder()
                            .uri("/foods")
                            .header("origin", origin)
                            .body(Body::empty())
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                response
                    .headers()
                    .get("access-control-allow-origin")
                    .map(|v| v.as_bytes().to_vec())
            }
        };

        assert_eq!(
            allowed_origin("http://localhost:3000").await,
            Some(b"http://localhost:3000".to_vec())
        );
        assert_eq!(allowed_origin("http://example.com").await, None);
    }

    #[tokio::test]
    async fn serve_rejects_invalid_config() {
        let config = GatewayConfig {
            host: "not an address".into(),
            ..GatewayConfig::default()
        };
        let err = serve(config, Arc::new(MemoryDatabase::sample()))
            .await
            .err()
            .expect("config must be rejected");
        assert!(matches!(err, ServerError::Config(_)));
    }
}
