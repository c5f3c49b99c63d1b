//! Request models with validation at construction
//!
//! Path parameters are validated here, before any pool access.
//! Body fields are taken as-is and bound as parameters; a missing field binds NULL.

pub mod company;
pub mod food;
pub mod student;
pub mod validation;

use serde_json::Value;

use crate::db::SqlValue;

pub use company::{CompanyName, NewCompany};
pub use food::{FoodId, FoodRename};
pub use student::{StudentKey, StudentRecord};
pub use validation::ValidationError;

/// Read one field of a JSON body as a bound value.
pub fn body_field(body: &Value, key: &str) -> SqlValue {
    body.get(key).map(SqlValue::from_json).unwrap_or(SqlValue::Null)
}
