//! Catalog item rename (`PATCH /food/name/{id}`)

use serde_json::Value;

use super::validation::{required, ValidationError};
use super::body_field;
use crate::db::SqlValue;

/// Non-empty catalog item id from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodId(String);

impl FoodId {
    pub fn new(id: Option<&str>) -> Result<Self, ValidationError> {
        required(id, "id").map(|id| Self(id.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodRename {
    pub id: FoodId,
    pub name: SqlValue,
}

impl FoodRename {
    pub fn new(id: Option<&str>, body: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            id: FoodId::new(id)?,
            name: body_field(body, "name"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_id_is_rejected() {
        assert!(FoodRename::new(Some(""), &json!({"name": "Chex"})).is_err());
        assert!(FoodRename::new(None, &json!({"name": "Chex"})).is_err());
        let rename = FoodRename::new(Some("7"), &json!({"name": "Chex"})).expect("valid");
        assert_eq!(rename.id.as_str(), "7");
    }
}
