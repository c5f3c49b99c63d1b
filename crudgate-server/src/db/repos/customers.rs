//! Customer repository - read-only, optionally filtered by country

use crate::db::pool::{Database, Row};
use crate::db::query::select_filtered;
use crate::db::schema::customer;
use crate::error::GatewayResult;

pub struct CustomerRepo<'a> {
    db: &'a dyn Database,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Customers in `country`, or every customer when no country is given.
    // NOTE: an absent country reads the whole table; callers cannot tell
    // "no filter" from a filter dropped by mistake.
    pub async fn list(&self, country: Option<&str>) -> GatewayResult<Vec<Row>> {
        let stmt = select_filtered(customer::TABLE, customer::COUNTRY, country);
        super::read(self.db, &stmt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;
    use serde_json::json;

    fn seeded() -> MemoryDatabase {
        let db = MemoryDatabase::sample();
        db.seed(
            "customer",
            [
                json!({"CUST_CODE": "C00013", "CUST_COUNTRY": "UK"}),
                json!({"CUST_CODE": "C00001", "CUST_COUNTRY": "USA"}),
                json!({"CUST_CODE": "C00020", "CUST_COUNTRY": "USA"}),
            ],
        );
        db
    }

    #[tokio::test]
    async fn filters_by_country() {
        let db = seeded();
        let rows = CustomerRepo::new(&db).list(Some("USA")).await.expect("list");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn no_country_reads_everything() {
        let db = seeded();
        let rows = CustomerRepo::new(&db).list(None).await.expect("list");
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn unknown_country_is_empty_not_error() {
        let db = seeded();
        let rows = CustomerRepo::new(&db).list(Some("Atlantis")).await.expect("list");
        assert!(rows.is_empty());
    }
}
