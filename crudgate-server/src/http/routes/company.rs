//! Organization endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::db::repos::CompanyRepo;
use crate::envelope::{Reply, Wording};
use crate::http::extractors::EchoBody;
use crate::http::server::AppState;
use crate::models::{CompanyName, NewCompany};

/// GET /company - every organization
async fn list_companies(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    Reply::rows(CompanyRepo::new(state.db.as_ref()).list().await, body)
}

/// POST /company - insert `{id, name, city}`
async fn create_company(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    let company = NewCompany::from_body(&body);
    let result = CompanyRepo::new(state.db.as_ref()).create(&company).await;
    Reply::affected(result, Wording::WRITE, body)
}

/// DELETE /company - delete by `{name}`
async fn delete_company(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    let name = CompanyName::from_body(&body);
    let result = CompanyRepo::new(state.db.as_ref()).delete(&name).await;
    Reply::affected(result, Wording::DELETE, body)
}

/// Organization routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/company",
        get(list_companies).post(create_company).delete(delete_company),
    )
}
