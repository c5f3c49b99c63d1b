//! Error types for crudgate-server

use crate::db::{PoolError, QueryError};
use crate::models::ValidationError;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Every way a gateway request can fail. Each variant maps to exactly one
/// envelope in [`crate::envelope`]; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No connection could be leased; nothing was executed.
    #[error("connection pool unavailable: {0}")]
    PoolUnavailable(#[from] PoolError),

    /// A required parameter was missing or malformed; the pool was not touched.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The database rejected the statement.
    #[error("query failed: {0}")]
    Query(#[from] QueryError),

    /// The insert step of an upsert failed after the update matched nothing.
    #[error("upsert insert failed: {0}")]
    UpsertInsert(#[source] QueryError),
}
