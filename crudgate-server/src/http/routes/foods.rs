//! Catalog item endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{get, patch},
    Router,
};
use serde_json::Value;

use crate::db::repos::FoodRepo;
use crate::db::Database;
use crate::envelope::{Reply, Wording};
use crate::error::GatewayResult;
use crate::http::extractors::{path_params, EchoBody};
use crate::http::server::AppState;
use crate::models::FoodRename;

/// GET /foods - every catalog item
async fn list_foods(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    Reply::rows(FoodRepo::new(state.db.as_ref()).list().await, body)
}

/// PATCH /food/name/{id} - set `{name}` on one item
async fn rename_food(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    EchoBody(body): EchoBody,
) -> Reply {
    let result = match path_params(id, "id") {
        Ok(id) => rename(state.db.as_ref(), Some(&id), &body).await,
        Err(e) => Err(e.into()),
    };
    Reply::affected(result, Wording::WRITE, body)
}

/// PATCH /food/name - no id, rejected before touching the pool
async fn rename_food_without_id(
    State(state): State<Arc<AppState>>,
    EchoBody(body): EchoBody,
) -> Reply {
    let result = rename(state.db.as_ref(), None, &body).await;
    Reply::affected(result, Wording::WRITE, body)
}

async fn rename(db: &dyn Database, id: Option<&str>, body: &Value) -> GatewayResult<u64> {
    let rename = FoodRename::new(id, body)?;
    FoodRepo::new(db).rename(&rename).await
}

/// Catalog item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/food/name", patch(rename_food_without_id))
        .route("/food/name/", patch(rename_food_without_id))
        .route("/food/name/{id}", patch(rename_food))
}
