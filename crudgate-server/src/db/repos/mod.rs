//! Repository implementations for the gateway's tables
//!
//! Each repository follows these patterns:
//! - Leases one connection per operation and drops it on every exit path
//! - Builds statements with [`crate::db::query`] (bound parameters only)
//! - Reports raw rows or the database's affected-row count, never a guess

pub mod company;
pub mod customers;
pub mod foods;
pub mod students;

pub use company::CompanyRepo;
pub use customers::CustomerRepo;
pub use foods::FoodRepo;
pub use students::StudentRepo;

use super::pool::{Database, Row};
use super::query::Statement;
use crate::error::GatewayResult;

/// Lease a connection and return every row `stmt` selects.
pub(crate) async fn read(db: &dyn Database, stmt: &Statement) -> GatewayResult<Vec<Row>> {
    let mut conn = db.acquire().await?;
    tracing::debug!(sql = %stmt.sql(), "read");
    let rows = conn.fetch_rows(stmt).await?;
    Ok(rows)
}

/// Lease a connection and return the affected-row count of `stmt`.
pub(crate) async fn write(db: &dyn Database, stmt: &Statement) -> GatewayResult<u64> {
    let mut conn = db.acquire().await?;
    tracing::debug!(sql = %stmt.sql(), "write");
    let affected = conn.execute(stmt).await?;
    Ok(affected)
}
