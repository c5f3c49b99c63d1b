//! Customer endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Router,
};

use crate::db::repos::CustomerRepo;
use crate::envelope::Reply;
use crate::http::extractors::{path_params, EchoBody};
use crate::http::server::AppState;

/// GET /customers - no country segment reads every customer
async fn list_customers(State(state): State<Arc<AppState>>, EchoBody(body): EchoBody) -> Reply {
    Reply::rows(CustomerRepo::new(state.db.as_ref()).list(None).await, body)
}

/// GET /customers/{country}
async fn list_customers_in(
    State(state): State<Arc<AppState>>,
    country: Result<Path<String>, PathRejection>,
    EchoBody(body): EchoBody,
) -> Reply {
    let result = match path_params(country, "country") {
        Ok(country) => CustomerRepo::new(state.db.as_ref()).list(Some(&country)).await,
        Err(e) => Err(e.into()),
    };
    Reply::rows(result, body)
}

/// Customer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/", get(list_customers))
        .route("/customers/{country}", get(list_customers_in))
}
