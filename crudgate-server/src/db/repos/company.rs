//! Organization repository
//!
//! - list: full table
//! - create: single insert with the caller-supplied id
//! - delete: by name, any number of rows

use crate::db::pool::{Database, Row};
use crate::db::query::{delete_by_field, insert, select_all};
use crate::db::schema::company;
use crate::error::GatewayResult;
use crate::models::{CompanyName, NewCompany};

pub struct CompanyRepo<'a> {
    db: &'a dyn Database,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> GatewayResult<Vec<Row>> {
        super::read(self.db, &select_all(company::TABLE)).await
    }

    pub async fn create(&self, new: &NewCompany) -> GatewayResult<u64> {
        let stmt = insert(
            company::TABLE,
            vec![
                (company::ID, new.id.clone()),
                (company::NAME, new.name.clone()),
                (company::CITY, new.city.clone()),
            ],
        );
        super::write(self.db, &stmt).await
    }

    pub async fn delete(&self, name: &CompanyName) -> GatewayResult<u64> {
        let stmt = delete_by_field(company::TABLE, company::NAME, name.0.clone());
        super::write(self.db, &stmt).await
    }
}
