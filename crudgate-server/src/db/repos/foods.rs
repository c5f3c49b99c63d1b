//! Catalog item repository

use crate::db::pool::{Database, Row};
use crate::db::query::{select_all, update_by_field};
use crate::db::schema::foods;
use crate::error::GatewayResult;
use crate::models::FoodRename;

pub struct FoodRepo<'a> {
    db: &'a dyn Database,
}

impl<'a> FoodRepo<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> GatewayResult<Vec<Row>> {
        super::read(self.db, &select_all(foods::TABLE)).await
    }

    /// Set the name of the item with the given id.
    pub async fn rename(&self, rename: &FoodRename) -> GatewayResult<u64> {
        let stmt = update_by_field(
            foods::TABLE,
            vec![(foods::NAME, rename.name.clone())],
            vec![(foods::ID, rename.id.as_str().into())],
        );
        super::write(self.db, &stmt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;
    use serde_json::json;

    #[tokio::test]
    async fn rename_updates_one_item() {
        let db = MemoryDatabase::sample();
        db.seed(
            "foods",
            [
                json!({"ITEM_ID": "1", "ITEM_NAME": "Chex Mix"}),
                json!({"ITEM_ID": "2", "ITEM_NAME": "Cheez-It"}),
            ],
        );
        let rename = FoodRename::new(Some("2"), &json!({"name": "Cheese Crackers"})).expect("valid");

        let affected = FoodRepo::new(&db).rename(&rename).await.expect("rename");
        assert_eq!(affected, 1);

        let rows = FoodRepo::new(&db).list().await.expect("list");
        assert_eq!(rows[0]["ITEM_NAME"], "Chex Mix");
        assert_eq!(rows[1]["ITEM_NAME"], "Cheese Crackers");
    }
}
