//! API documentation endpoint
//!
//! Serves a hand-maintained OpenAPI 3 document; keep it in step with the
//! routers in this directory.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

fn envelope_schema() -> Value {
    json!({
        "type": "object",
        "required": ["status", "affectedRows", "object"],
        "properties": {
            "operation": { "type": "string", "enum": ["update", "insert"] },
            "status": {
                "type": "string",
                "enum": ["success", "successful", "failure", "failed", "Internal error"]
            },
            "affectedRows": { "type": "integer", "minimum": 0 },
            "object": { "description": "request body, echoed unchanged" }
        }
    })
}

fn path_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "description": description,
        "schema": { "type": "string" }
    })
}

fn body(properties: Value, required: &[&str]) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "type": "object", "required": required, "properties": properties }
            }
        }
    })
}

fn rows(description: &str) -> Value {
    json!({
        "200": {
            "description": description,
            "content": { "application/json": { "schema": { "type": "array", "items": { "type": "object" } } } }
        },
        "503": { "description": "connection pool unavailable", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Envelope" } } } }
    })
}

fn envelope(description: &str) -> Value {
    json!({
        "200": { "description": description, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Envelope" } } } },
        "503": { "description": "connection pool unavailable", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Envelope" } } } }
    })
}

/// The OpenAPI document for every gateway route.
pub fn openapi() -> Value {
    let text = json!({ "type": "string" });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "crudgate",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD operations over the sample database with uniform JSON envelopes"
        },
        "paths": {
            "/company": {
                "get": { "description": "Return all companies", "responses": rows("array of all company objects") },
                "post": {
                    "description": "Insert a company",
                    "requestBody": body(json!({ "id": text, "name": text, "city": text }), &["name"]),
                    "responses": envelope("insert result")
                },
                "delete": {
                    "description": "Delete companies by name",
                    "requestBody": body(json!({ "name": text }), &["name"]),
                    "responses": envelope("delete result")
                }
            },
            "/customers/{country}": {
                "get": {
                    "description": "Return customers of a country; without the segment, all customers",
                    "parameters": [path_param("country", "country name of the customers")],
                    "responses": rows("array of customer objects")
                }
            },
            "/foods": {
                "get": { "description": "Return all food items", "responses": rows("array of all food objects") }
            },
            "/food/name/{id}": {
                "patch": {
                    "description": "Rename a food item",
                    "parameters": [path_param("id", "the food id")],
                    "requestBody": body(json!({ "name": text }), &["name"]),
                    "responses": envelope("update result")
                }
            },
            "/students": {
                "get": { "description": "Return all students", "responses": rows("array of all students") }
            },
            "/student/{class}/{section}/{rollId}": {
                "put": {
                    "description": "Upsert a student record",
                    "parameters": [
                        path_param("class", "the class the student belongs to"),
                        path_param("section", "the section the student belongs to"),
                        path_param("rollId", "the roll id of the student")
                    ],
                    "requestBody": body(json!({ "name": text, "title": text }), &["name"]),
                    "responses": envelope("upsert result, tagged with operation")
                }
            },
            "/say": {
                "get": {
                    "description": "Return a generated sentence embedding the keyword",
                    "parameters": [{
                        "name": "keyword",
                        "in": "query",
                        "required": true,
                        "description": "keyword to embed in a sentence",
                        "schema": text
                    }],
                    "responses": {
                        "200": { "description": "upstream JSON, passed through" },
                        "503": { "description": "upstream failed" }
                    }
                }
            },
            "/health": {
                "get": { "description": "Liveness and database reachability", "responses": { "200": { "description": "health report" } } }
            }
        },
        "components": {
            "schemas": { "Envelope": envelope_schema() }
        }
    })
}

/// GET /docs
async fn docs() -> Json<Value> {
    Json(openapi())
}

/// Documentation routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/docs", get(docs))
}
