//! Student repository - the only upserting table
//!
//! Both upsert steps share one leased connection; see [`crate::db::upsert`].

use crate::db::pool::{Database, Row};
use crate::db::query::{insert, select_all, update_by_field, SqlValue};
use crate::db::schema::student;
use crate::db::upsert::{self, UpsertPlan, Upserted};
use crate::error::GatewayResult;
use crate::models::{StudentKey, StudentRecord};

pub struct StudentRepo<'a> {
    db: &'a dyn Database,
}

impl<'a> StudentRepo<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> GatewayResult<Vec<Row>> {
        super::read(self.db, &select_all(student::TABLE)).await
    }

    /// Update the record at `key`, inserting it if the update matched nothing.
    pub async fn upsert(&self, key: &StudentKey, record: &StudentRecord) -> GatewayResult<Upserted> {
        let plan = plan(key, record);
        let mut conn = self.db.acquire().await?;
        tracing::debug!(update = %plan.update.sql(), insert = %plan.insert.sql(), "upsert");
        upsert::run(conn.as_mut(), &plan).await
    }
}

fn key_columns(key: &StudentKey) -> Vec<(&'static str, SqlValue)> {
    vec![
        (student::CLASS, key.class.as_str().into()),
        (student::SECTION, key.section.as_str().into()),
        (student::ROLL_ID, SqlValue::Int(key.roll_id)),
    ]
}

fn plan(key: &StudentKey, record: &StudentRecord) -> UpsertPlan {
    let attributes = vec![
        (student::NAME, record.name.clone()),
        (student::TITLE, record.title.clone()),
    ];
    let mut row = attributes.clone();
    row.extend(key_columns(key));

    UpsertPlan {
        update: update_by_field(student::TABLE, attributes, key_columns(key)),
        insert: insert(student::TABLE, row),
    }
}
