//! Enrolled person key and attributes (`PUT /student/{class}/{section}/{rollId}`)

use serde_json::Value;

use super::validation::{required, ValidationError};
use super::body_field;
use crate::db::SqlValue;

/// Composite natural key of a student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentKey {
    pub class: String,
    pub section: String,
    pub roll_id: i64,
}

impl StudentKey {
    /// Build a key from path segments.
    ///
    /// # Rules
    /// - `rollId` must be present and non-empty
    /// - `rollId` must be an integer
    ///
    /// # Example
    /// ```
    /// use crudgate_server::models::StudentKey;
    ///
    /// assert!(StudentKey::new("V", "A", Some("12")).is_ok());
    /// assert!(StudentKey::new("V", "A", Some("")).is_err());
    /// assert!(StudentKey::new("V", "A", Some("twelve")).is_err());
    /// ```
    pub fn new(class: &str, section: &str, roll_id: Option<&str>) -> Result<Self, ValidationError> {
        let roll_id = required(roll_id, "rollId")?
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "rollId",
                reason: "must be an integer",
            })?;

        Ok(Self {
            class: class.to_owned(),
            section: section.to_owned(),
            roll_id,
        })
    }
}

/// Attributes written by the upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: SqlValue,
    pub title: SqlValue,
}

impl StudentRecord {
    pub fn from_body(body: &Value) -> Self {
        Self {
            name: body_field(body, "name"),
            title: body_field(body, "title"),
        }
    }
}
