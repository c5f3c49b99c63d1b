//! Custom Axum extractors

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, Path, Request};
use serde_json::{Map, Value};

use crate::models::ValidationError;

/// The request body as JSON, kept verbatim so replies can echo it.
///
/// A missing, empty or unparseable body becomes `{}`. Must be the last
/// extractor of a handler since it consumes the body.
#[derive(Debug, Clone, PartialEq)]
pub struct EchoBody(pub Value);

impl<S> FromRequest<S> for EchoBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                tracing::warn!(error = %rejection, "unreadable request body");
                Bytes::new()
            }
        };

        Ok(Self(parse_body(&bytes)))
    }
}

/// Unwrap path parameters, turning axum's plain-text rejection (e.g. invalid
/// percent-encoding) into a validation failure answered with an envelope.
pub fn path_params<T>(
    path: Result<Path<T>, PathRejection>,
    field: &'static str,
) -> Result<T, ValidationError> {
    match path {
        Ok(Path(params)) => Ok(params),
        Err(rejection) => {
            tracing::warn!(error = %rejection, field, "unusable path parameter");
            Err(ValidationError::InvalidFormat {
                field,
                reason: "not a valid path segment",
            })
        }
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }

    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "request body is not JSON, echoing {{}}");
        Value::Object(Map::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    #[test]
    fn empty_and_invalid_bodies_become_empty_object() {
        assert_eq!(parse_body(b""), json!({}));
        assert_eq!(parse_body(b"  \n"), json!({}));
        assert_eq!(parse_body(b"name=acme"), json!({}));
    }

    #[tokio::test]
    async fn json_body_is_kept_verbatim() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Acme","extra":[1,2]}"#))
            .expect("request");

        let EchoBody(body) = EchoBody::from_request(req, &()).await.expect("infallible");
        assert_eq!(body, json!({"name": "Acme", "extra": [1, 2]}));
    }
}
