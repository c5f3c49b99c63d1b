//! Database layer - connection pool, statement builder and repositories
//!
//! # Design Principles
//!
//! - Bounded pool (max 5 connections by default), leased per request
//! - Leases release on drop - no manual release calls at call sites
//! - Every caller value is a bound parameter - never formatted into SQL
//! - Upsert decides from the update's affected-row count - no pre-check query

pub mod memory;
pub mod pool;
pub mod query;
pub mod repos;
pub mod schema;
pub mod upsert;

pub use memory::MemoryDatabase;
pub use pool::{
    Connection, Database, Lease, PgDatabase, PoolConfig, PoolError, QueryError, Row,
    DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS,
};
pub use query::{SqlValue, Statement};
pub use upsert::{Operation, UpsertPlan, Upserted};
