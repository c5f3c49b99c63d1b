//! Update-else-insert on a single leased connection
//!
//! The update runs first; only an affected-row count of zero moves on to the
//! insert. There is no existence pre-check and no transaction: a concurrent
//! writer inserting the same key between the two steps makes the insert fail,
//! and that failure is returned as-is.

use serde::Serialize;

use super::pool::Connection;
use super::query::Statement;
use crate::error::GatewayError;

/// Which step of the upsert produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Update,
    Insert,
}

/// Outcome of a completed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub operation: Operation,
    pub affected_rows: u64,
}

/// The two statements of an upsert, built against the same key.
#[derive(Debug, Clone)]
pub struct UpsertPlan {
    pub update: Statement,
    pub insert: Statement,
}

/// Run `plan` on `conn`.
///
/// # Errors
///
/// [`GatewayError::Query`] if the update fails, [`GatewayError::UpsertInsert`]
/// if the fallback insert fails.
pub async fn run(conn: &mut dyn Connection, plan: &UpsertPlan) -> Result<Upserted, GatewayError> {
    let updated = conn.execute(&plan.update).await?;
    if updated > 0 {
        tracing::debug!(table = plan.update.table(), rows = updated, "upsert resolved as update");
        return Ok(Upserted {
            operation: Operation::Update,
            affected_rows: updated,
        });
    }

    let inserted = conn
        .execute(&plan.insert)
        .await
        .map_err(GatewayError::UpsertInsert)?;
    tracing::debug!(table = plan.insert.table(), rows = inserted, "upsert resolved as insert");

    Ok(Upserted {
        operation: Operation::Insert,
        affected_rows: inserted,
    })
}
