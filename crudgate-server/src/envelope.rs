//! Uniform response contract
//!
//! Every handler ends in exactly one [`Reply`]. Errors are matched
//! exhaustively, so no failure path can finish without writing a body:
//!
//! | outcome                  | HTTP | status                     | affectedRows |
//! |--------------------------|------|----------------------------|--------------|
//! | pool unavailable         | 503  | `Internal error`           | 0            |
//! | validation failure       | 200  | `failure`                  | 0            |
//! | write rejected           | 200  | `failure` (`failed` on delete) | 0        |
//! | read rejected            | 500  | `failure`                  | 0            |
//! | write ok                 | 200  | `success` (`successful` on delete) | count |
//! | delete matched nothing   | 200  | `failed`                   | 0            |
//! | read ok                  | 200  | raw row array              | -            |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::db::{Operation, Row, Upserted};
use crate::error::{GatewayError, GatewayResult};

/// Value of the envelope's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "successful")]
    Successful,
    #[serde(rename = "failure")]
    Failure,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "Internal error")]
    InternalError,
}

/// Status words for one kind of write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wording {
    /// The statement ran and touched at least one row.
    pub ok: Status,
    /// The statement ran and touched nothing.
    pub none: Status,
    /// The statement failed.
    pub err: Status,
}

impl Wording {
    /// Inserts and updates.
    pub const WRITE: Self = Self {
        ok: Status::Success,
        none: Status::Success,
        err: Status::Failure,
    };

    /// Deletes answer `successful`, or `failed` when nothing matched.
    pub const DELETE: Self = Self {
        ok: Status::Successful,
        none: Status::Failed,
        err: Status::Failed,
    };
}

/// `{operation?, status, affectedRows, object}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    pub status: Status,
    pub affected_rows: u64,
    pub object: Value,
}

impl Envelope {
    pub fn new(status: Status, affected_rows: u64, object: Value) -> Self {
        Self {
            operation: None,
            status,
            affected_rows,
            object,
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// `{status, object}` for failures that involve no statement (the proxy).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub status: Status,
    pub object: Value,
}

/// The single terminal response of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Rows(Vec<Row>),
    Passthrough(Value),
    Envelope(StatusCode, Envelope),
    Notice(StatusCode, Notice),
}

impl Reply {
    /// Reply for a read.
    pub fn rows(result: GatewayResult<Vec<Row>>, object: Value) -> Self {
        match result {
            Ok(rows) => Self::Rows(rows),
            Err(err) => Self::failure(err, Status::Failure, StatusCode::INTERNAL_SERVER_ERROR, object),
        }
    }

    /// Reply for an insert, update or delete.
    pub fn affected(result: GatewayResult<u64>, wording: Wording, object: Value) -> Self {
        match result {
            Ok(0) => Self::Envelope(StatusCode::OK, Envelope::new(wording.none, 0, object)),
            Ok(rows) => Self::Envelope(StatusCode::OK, Envelope::new(wording.ok, rows, object)),
            Err(err) => Self::failure(err, wording.err, StatusCode::OK, object),
        }
    }

    /// Reply for an upsert, tagged with the step that completed it.
    pub fn upserted(result: GatewayResult<Upserted>, object: Value) -> Self {
        match result {
            Ok(done) => Self::Envelope(
                StatusCode::OK,
                Envelope::new(Status::Success, done.affected_rows, object).with_operation(done.operation),
            ),
            Err(err) => Self::failure(err, Status::Failure, StatusCode::OK, object),
        }
    }

    fn failure(err: GatewayError, status: Status, rejected: StatusCode, object: Value) -> Self {
        let (code, status) = match &err {
            GatewayError::PoolUnavailable(e) => {
                tracing::error!(error = %e, "connection pool unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, Status::InternalError)
            }
            GatewayError::Validation(e) => {
                tracing::warn!(error = %e, "request rejected before database access");
                (StatusCode::OK, status)
            }
            GatewayError::Query(e) => {
                tracing::error!(error = %e, "statement failed");
                (rejected, status)
            }
            GatewayError::UpsertInsert(e) => {
                tracing::error!(error = %e, "upsert insert failed");
                (rejected, status)
            }
        };

        Self::Envelope(code, Envelope::new(status, 0, object))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rows(_) | Self::Passthrough(_) => StatusCode::OK,
            Self::Envelope(code, _) | Self::Notice(code, _) => *code,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Self::Rows(rows) => Json(rows).into_response(),
            Self::Passthrough(body) => Json(body).into_response(),
            Self::Envelope(code, envelope) => (code, Json(envelope)).into_response(),
            Self::Notice(code, notice) => (code, Json(notice)).into_response(),
        }
    }
}
