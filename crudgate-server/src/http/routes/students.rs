//! Student endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{get, put},
    Router,
};
use serde_json::Value;

use crate::db::repos::StudentRepo;
use crate::db::{Database, Upserted};
use crate::envelope::Reply;
use crate::error::GatewayResult;
use crate::http::extractors::{path_params, EchoBody};
use crate::http::server::AppState;
use crate::models::{StudentKey, StudentRecord};

/// GET /students - every student
async fn list_students(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    Reply::rows(StudentRepo::new(state.db.as_ref()).list().await, body)
}

/// PUT /student/{class}/{section}/{rollId} - upsert `{name, title}`
async fn put_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String, String)>, PathRejection>,
    EchoBody(body): EchoBody,
) -> Reply {
    let result = match path_params(path, "path") {
        Ok((class, section, roll_id)) => {
            upsert(state.db.as_ref(), &class, &section, Some(&roll_id), &body).await
        }
        Err(e) => Err(e.into()),
    };
    Reply::upserted(result, body)
}

/// PUT /student/{class}/{section} - no rollId, rejected before touching the pool
async fn put_student_without_roll_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
    EchoBody(body): EchoBody,
) -> Reply {
    let result = match path_params(path, "path") {
        Ok((class, section)) => upsert(state.db.as_ref(), &class, &section, None, &body).await,
        Err(e) => Err(e.into()),
    };
    Reply::upserted(result, body)
}

async fn upsert(
    db: &dyn Database,
    class: &str,
    section: &str,
    roll_id: Option<&str>,
    body: &Value,
) -> GatewayResult<Upserted> {
    let key = StudentKey::new(class, section, roll_id)?;
    let record = StudentRecord::from_body(body);
    StudentRepo::new(db).upsert(&key, &record).await
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students))
        .route("/student/{class}/{section}", put(put_student_without_roll_id))
        .route("/student/{class}/{section}/", put(put_student_without_roll_id))
        .route("/student/{class}/{section}/{roll_id}", put(put_student))
}
