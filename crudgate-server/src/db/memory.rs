//! In-process [`Database`] for tests and local demos
//!
//! Statements are interpreted from their [`Shape`]; no SQL is parsed. Matching
//! follows SQL equality: NULL never matches, and updates report matched rows.
//! The pool is bounded by a semaphore, and every lease is counted until dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::pool::{
    Connection, Database, Lease, PoolError, QueryError, Row, DEFAULT_ACQUIRE_TIMEOUT,
    DEFAULT_MAX_CONNECTIONS,
};
use super::query::{Shape, SqlValue, Statement};
use super::schema;

#[derive(Default)]
struct Table {
    rows: Vec<Row>,
    unique_keys: Vec<Vec<String>>,
}

#[derive(Default)]
struct Shared {
    tables: Mutex<HashMap<String, Table>>,
    executed: Mutex<Vec<Statement>>,
    unavailable: AtomicBool,
    failing: AtomicBool,
    leased: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bounded in-memory store. Clones share the same tables and counters.
#[derive(Clone)]
pub struct MemoryDatabase {
    shared: Arc<Shared>,
    permits: Arc<Semaphore>,
    acquire_timeout: Duration,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatabase {
    /// Empty store with the default pool bound and no tables.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CONNECTIONS as usize, DEFAULT_ACQUIRE_TIMEOUT)
    }

    pub fn with_capacity(max_connections: usize, acquire_timeout: Duration) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            permits: Arc::new(Semaphore::new(max_connections)),
            acquire_timeout,
        }
    }

    /// Store with the four gateway tables and their natural keys.
    pub fn sample() -> Self {
        Self::new().with_sample_tables()
    }

    /// Create the four gateway tables, each with its natural key.
    pub fn with_sample_tables(self) -> Self {
        self.create_table(schema::company::TABLE);
        self.add_unique_key(schema::company::TABLE, &[schema::company::ID]);
        self.create_table(schema::customer::TABLE);
        self.create_table(schema::foods::TABLE);
        self.add_unique_key(schema::foods::TABLE, &[schema::foods::ID]);
        self.create_table(schema::student::TABLE);
        self.add_unique_key(
            schema::student::TABLE,
            &[
                schema::student::CLASS,
                schema::student::SECTION,
                schema::student::ROLL_ID,
            ],
        );
        self
    }

    pub fn create_table(&self, table: &str) {
        lock(&self.shared.tables)
            .entry(table.to_owned())
            .or_default();
    }

    /// Reject inserts that duplicate every column of `columns` in an existing row.
    pub fn add_unique_key(&self, table: &str, columns: &[&str]) {
        lock(&self.shared.tables)
            .entry(table.to_owned())
            .or_default()
            .unique_keys
            .push(columns.iter().map(|c| c.to_string()).collect());
    }

    /// Append raw rows; non-object values are ignored.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Value>) {
        let mut tables = lock(&self.shared.tables);
        let target = tables.entry(table.to_owned()).or_default();
        target.rows.extend(rows.into_iter().filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        }));
    }

    /// Snapshot of a table's rows.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        lock(&self.shared.tables)
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Make every acquire fail, as an exhausted or unreachable pool would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shared.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every statement fail after the connection has been leased.
    pub fn set_failing(&self, failing: bool) {
        self.shared.failing.store(failing, Ordering::SeqCst);
    }

    /// Statements run so far, in order.
    pub fn executed(&self) -> Vec<Statement> {
        lock(&self.shared.executed).clone()
    }

    /// Leases handed out and not yet dropped.
    pub fn leased(&self) -> usize {
        self.shared.leased.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn acquire(&self) -> Result<Lease, PoolError> {
        if self.shared.unavailable.load(Ordering::SeqCst) {
            return Err(PoolError::Timeout);
        }

        let permit = tokio::time::timeout(self.acquire_timeout, self.permits.clone().acquire_owned())
            .await
            .map_err(|_| PoolError::Timeout)?
            .map_err(|_| PoolError::Closed)?;

        self.shared.leased.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryLease {
            shared: Arc::clone(&self.shared),
            _permit: permit,
        }))
    }

    async fn close(&self) {
        self.permits.close();
    }
}

struct MemoryLease {
    shared: Arc<Shared>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for MemoryLease {
    fn drop(&mut self) {
        self.shared.leased.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryLease {
    fn begin(&self, stmt: &Statement) -> Result<(), QueryError> {
        lock(&self.shared.executed).push(stmt.clone());
        if self.shared.failing.load(Ordering::SeqCst) {
            return Err(QueryError::Rejected("injected statement failure".into()));
        }
        Ok(())
    }

    fn with_table<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Table) -> Result<T, QueryError>,
    ) -> Result<T, QueryError> {
        let mut tables = lock(&self.shared.tables);
        let table = tables
            .get_mut(name)
            .ok_or_else(|| QueryError::Rejected(format!("relation \"{}\" does not exist", name)))?;
        f(table)
    }
}

#[async_trait]
impl Connection for MemoryLease {
    async fn fetch_rows(&mut self, stmt: &Statement) -> Result<Vec<Row>, QueryError> {
        self.begin(stmt)?;
        let Shape::Select { table, filter } = stmt.shape() else {
            return Err(QueryError::Rejected("statement does not return rows".into()));
        };

        self.with_table(table, |t| {
            Ok(match filter {
                Some(column) => t
                    .rows
                    .iter()
                    .filter(|row| matches(row.get(*column), &stmt.params()[0]))
                    .cloned()
                    .collect(),
                None => t.rows.clone(),
            })
        })
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<u64, QueryError> {
        self.begin(stmt)?;
        let params = stmt.params();

        match stmt.shape() {
            Shape::Select { .. } => self.fetch_rows_counted(stmt),
            Shape::Insert { table, columns } => self.with_table(table, |t| {
                for key in &t.unique_keys {
                    let candidate: Vec<&SqlValue> = key
                        .iter()
                        .filter_map(|k| columns.iter().position(|c| c == k).map(|i| &params[i]))
                        .collect();
                    if candidate.len() != key.len() || candidate.contains(&&SqlValue::Null) {
                        continue;
                    }
                    let duplicate = t.rows.iter().any(|row| {
                        key.iter()
                            .zip(&candidate)
                            .all(|(column, value)| matches(row.get(column), value))
                    });
                    if duplicate {
                        return Err(QueryError::Rejected(format!(
                            "duplicate key value violates unique constraint on {}",
                            key.join(", ")
                        )));
                    }
                }

                let row = columns
                    .iter()
                    .zip(params)
                    .map(|(c, v)| (c.to_string(), v.to_json()))
                    .collect();
                t.rows.push(row);
                Ok(1)
            }),
            Shape::Delete { table, column } => self.with_table(table, |t| {
                let before = t.rows.len();
                t.rows.retain(|row| !matches(row.get(*column), &params[0]));
                Ok((before - t.rows.len()) as u64)
            }),
            Shape::Update { table, set, filter } => self.with_table(table, |t| {
                let (set_params, filter_params) = params.split_at(set.len());
                let mut matched = 0;
                for row in t.rows.iter_mut() {
                    let hit = filter
                        .iter()
                        .zip(filter_params)
                        .all(|(column, value)| matches(row.get(*column), value));
                    if hit {
                        for (column, value) in set.iter().zip(set_params) {
                            row.insert(column.to_string(), value.to_json());
                        }
                        matched += 1;
                    }
                }
                Ok(matched)
            }),
        }
    }

    async fn ping(&mut self) -> Result<(), QueryError> {
        Ok(())
    }
}

impl MemoryLease {
    fn fetch_rows_counted(&self, stmt: &Statement) -> Result<u64, QueryError> {
        let Shape::Select { table, filter } = stmt.shape() else {
            return Ok(0);
        };
        self.with_table(table, |t| {
            Ok(t.rows
                .iter()
                .filter(|row| filter.map_or(true, |c| matches(row.get(c), &stmt.params()[0])))
                .count() as u64)
        })
    }
}

/// SQL equality between a stored cell and a bound parameter.
fn matches(stored: Option<&Value>, param: &SqlValue) -> bool {
    match (stored, param) {
        (None, _) | (Some(Value::Null), _) | (_, SqlValue::Null) => false,
        (Some(Value::String(s)), SqlValue::Text(p)) => s == p,
        (Some(other), SqlValue::Text(p)) => other.to_string() == *p,
        (Some(Value::Number(n)), SqlValue::Int(p)) => n.as_i64() == Some(*p),
        (Some(Value::String(s)), SqlValue::Int(p)) => s.parse::<i64>().ok() == Some(*p),
        (Some(_), SqlValue::Int(_)) => false,
    }
}
