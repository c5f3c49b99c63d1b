//! Organization request bodies

use serde_json::Value;

use super::body_field;
use crate::db::SqlValue;

/// Organization to create (`POST /company`); the id is caller-supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub id: SqlValue,
    pub name: SqlValue,
    pub city: SqlValue,
}

impl NewCompany {
    pub fn from_body(body: &Value) -> Self {
        Self {
            id: body_field(body, "id"),
            name: body_field(body, "name"),
            city: body_field(body, "city"),
        }
    }
}

/// Name of the organizations to delete (`DELETE /company`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(pub SqlValue);

impl CompanyName {
    pub fn from_body(body: &Value) -> Self {
        Self(body_field(body, "name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_id_binds_as_text() {
        let company = NewCompany::from_body(&json!({"id": 19, "name": "Acme", "city": "Boston"}));
        assert_eq!(company.id, SqlValue::from("19"));
        assert_eq!(company.city, SqlValue::from("Boston"));
    }
}
