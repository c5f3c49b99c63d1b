//! Statement construction
//!
//! Every builder binds caller values as positional parameters (`$1`, `$2`, ...).
//! Table and column names only ever come from `&'static str` constants in
//! [`super::schema`], and are quoted when rendered.

use std::fmt::Write as _;

use serde_json::Value;

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Null,
}

impl SqlValue {
    /// Bind a JSON body field.
    ///
    /// Strings bind as-is, `null` binds as SQL NULL, and any other JSON value
    /// binds as its JSON text (the gateway's body columns are all textual).
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// JSON rendition, used when the in-memory store materializes rows.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Null => Value::Null,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Logical shape of a statement; parameters are kept separately in
/// [`Statement::params`] in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Select {
        table: &'static str,
        filter: Option<&'static str>,
    },
    Insert {
        table: &'static str,
        columns: Vec<&'static str>,
    },
    Delete {
        table: &'static str,
        column: &'static str,
    },
    Update {
        table: &'static str,
        set: Vec<&'static str>,
        filter: Vec<&'static str>,
    },
}

/// A parameterized statement ready to execute on a leased connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    shape: Shape,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn table(&self) -> &'static str {
        match &self.shape {
            Shape::Select { table, .. }
            | Shape::Insert { table, .. }
            | Shape::Delete { table, .. }
            | Shape::Update { table, .. } => *table,
        }
    }

    /// Render PostgreSQL text with positional placeholders.
    pub fn sql(&self) -> String {
        let mut sql = String::new();
        match &self.shape {
            Shape::Select { table, filter } => {
                let _ = write!(sql, "SELECT * FROM {}", quote_ident(table));
                if let Some(column) = filter {
                    let _ = write!(sql, " WHERE {} = $1", quote_ident(column));
                }
            }
            Shape::Insert { table, columns } => {
                let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
                let slots: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
                let _ = write!(
                    sql,
                    "INSERT INTO {} ({}) VALUES ({})",
                    quote_ident(table),
                    names.join(", "),
                    slots.join(", ")
                );
            }
            Shape::Delete { table, column } => {
                let _ = write!(
                    sql,
                    "DELETE FROM {} WHERE {} = $1",
                    quote_ident(table),
                    quote_ident(column)
                );
            }
            Shape::Update { table, set, filter } => {
                let assignments: Vec<String> = set
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{} = ${}", quote_ident(c), i + 1))
                    .collect();
                let predicates: Vec<String> = filter
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{} = ${}", quote_ident(c), set.len() + i + 1))
                    .collect();
                let _ = write!(
                    sql,
                    "UPDATE {} SET {} WHERE {}",
                    quote_ident(table),
                    assignments.join(", "),
                    predicates.join(" AND ")
                );
            }
        }
        sql
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Unconditional read of a whole table.
pub fn select_all(table: &'static str) -> Statement {
    Statement {
        shape: Shape::Select {
            table,
            filter: None,
        },
        params: Vec::new(),
    }
}

/// Equality-filtered read.
///
/// An absent `value` degrades to [`select_all`]: no WHERE clause is added.
pub fn select_filtered(
    table: &'static str,
    field: &'static str,
    value: Option<impl Into<SqlValue>>,
) -> Statement {
    match value {
        Some(value) => Statement {
            shape: Shape::Select {
                table,
                filter: Some(field),
            },
            params: vec![value.into()],
        },
        None => select_all(table),
    }
}

/// Insert one row; `values` pairs each column with its bound value.
pub fn insert(table: &'static str, values: Vec<(&'static str, SqlValue)>) -> Statement {
    let (columns, params) = values.into_iter().unzip();
    Statement {
        shape: Shape::Insert { table, columns },
        params,
    }
}

/// Delete rows matching `field = value`.
pub fn delete_by_field(table: &'static str, field: &'static str, value: SqlValue) -> Statement {
    Statement {
        shape: Shape::Delete {
            table,
            column: field,
        },
        params: vec![value],
    }
}

/// Update `set` columns on rows matching every `filter` equality.
pub fn update_by_field(
    table: &'static str,
    set: Vec<(&'static str, SqlValue)>,
    filter: Vec<(&'static str, SqlValue)>,
) -> Statement {
    let (set_columns, mut params): (Vec<_>, Vec<_>) = set.into_iter().unzip();
    let (filter_columns, filter_params): (Vec<_>, Vec<_>) = filter.into_iter().unzip();
    params.extend(filter_params);
    Statement {
        shape: Shape::Update {
            table,
            set: set_columns,
            filter: filter_columns,
        },
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_all_has_no_params() {
        let stmt = select_all("company");
        assert_eq!(stmt.sql(), r#"SELECT * FROM "company""#);
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn filtered_select_binds_value() {
        let stmt = select_filtered("customer", "CUST_COUNTRY", Some("India"));
        assert_eq!(
            stmt.sql(),
            r#"SELECT * FROM "customer" WHERE "CUST_COUNTRY" = $1"#
        );
        assert_eq!(stmt.params(), &[SqlValue::from("India")]);
    }

    #[test]
    fn filtered_select_without_value_reads_everything() {
        let stmt = select_filtered("customer", "CUST_COUNTRY", None::<String>);
        assert_eq!(stmt, select_all("customer"));
    }

    #[test]
    fn hostile_values_never_reach_statement_text() {
        let payload = r#"x" OR 1=1; DROP TABLE company; --"#;
        let stmt = delete_by_field("company", "COMPANY_NAME", payload.into());
        assert_eq!(stmt.sql(), r#"DELETE FROM "company" WHERE "COMPANY_NAME" = $1"#);
        assert_eq!(stmt.params(), &[SqlValue::from(payload)]);
    }

    #[test]
    fn insert_numbers_placeholders_in_column_order() {
        let stmt = insert(
            "company",
            vec![
                ("COMPANY_ID", "18".into()),
                ("COMPANY_NAME", "Order All".into()),
                ("COMPANY_CITY", SqlValue::Null),
            ],
        );
        assert_eq!(
            stmt.sql(),
            r#"INSERT INTO "company" ("COMPANY_ID", "COMPANY_NAME", "COMPANY_CITY") VALUES ($1, $2, $3)"#
        );
        assert_eq!(stmt.params().len(), 3);
        assert_eq!(stmt.params()[2], SqlValue::Null);
    }

    #[test]
    fn update_places_filter_params_after_set_params() {
        let stmt = update_by_field(
            "student",
            vec![("NAME", "Ada".into()), ("TITLE", "Ms".into())],
            vec![
                ("CLASS", "V".into()),
                ("SECTION", "A".into()),
                ("ROLLID", SqlValue::Int(12)),
            ],
        );
        assert_eq!(
            stmt.sql(),
            r#"UPDATE "student" SET "NAME" = $1, "TITLE" = $2 WHERE "CLASS" = $3 AND "SECTION" = $4 AND "ROLLID" = $5"#
        );
        assert_eq!(
            stmt.params(),
            &[
                SqlValue::from("Ada"),
                SqlValue::from("Ms"),
                SqlValue::from("V"),
                SqlValue::from("A"),
                SqlValue::Int(12),
            ]
        );
    }

    #[test]
    fn json_fields_bind_as_text_or_null() {
        assert_eq!(SqlValue::from_json(&json!("Delhi")), SqlValue::from("Delhi"));
        assert_eq!(SqlValue::from_json(&json!(42)), SqlValue::from("42"));
        assert_eq!(SqlValue::from_json(&Value::Null), SqlValue::Null);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }
}
