//! Text-generation passthrough endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};

use crate::envelope::{Notice, Reply, Status};
use crate::http::extractors::EchoBody;
use crate::http::server::AppState;

/// First `keyword` of the query string; repeats are ignored.
fn keyword(query: &Result<Query<Vec<(String, String)>>, QueryRejection>) -> Option<&str> {
    match query {
        Ok(Query(pairs)) => pairs
            .iter()
            .find(|(name, _)| name == "keyword")
            .map(|(_, value)| value.as_str()),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable query string, forwarding without keyword");
            None
        }
    }
}

/// GET /say - upstream JSON verbatim, or 503 `{status, object}`
async fn say(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    EchoBody(body): EchoBody,
) -> Reply {
    match state.generator.say(keyword(&query)).await {
        Ok(reply) => Reply::Passthrough(reply),
        Err(e) => {
            tracing::error!(error = %e, "text generator failed");
            Reply::Notice(
                StatusCode::SERVICE_UNAVAILABLE,
                Notice {
                    status: Status::InternalError,
                    object: body,
                },
            )
        }
    }
}

/// Proxy routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/say", get(say))
}
