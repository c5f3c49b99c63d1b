//! Database connectivity check
//!
//! Leases one connection from a fresh pool and pings it, the same path
//! every request takes.

use anyhow::{Context, Result};
use clap::Parser;

use crudgate_server::db::{Database, PgDatabase};

use super::serve::DatabaseArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Verify the database is reachable with the configured pool settings
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let config = args.database.pool_config();
    let db = PgDatabase::connect_lazy(&config).context("Invalid database configuration")?;

    let outcome = async {
        let mut conn = db.acquire().await.context("Could not lease a connection")?;
        conn.ping().await.context("Database did not answer")
    }
    .await;
    db.close().await;
    outcome?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database reachable"
    );
    println!("ok: database reachable");
    Ok(())
}
