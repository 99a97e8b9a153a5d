//! Schema loading and validation
//!
//! Schemas are JSON Schema (Draft 7) documents written in YAML. They may be
//! split over several files joined with `$ref` markers; [`SchemaStore`]
//! resolves them into one self-contained tree and [`SchemaValidator`]
//! checks both the schema and the data documents validated against it.

mod store;
mod validator;

pub use store::{APP_SCHEMA, CompiledSchema, ROUTE_SCHEMA, SCENARIO_SCHEMA, SchemaStore};
pub use validator::SchemaValidator;

use serde_json::Value;

/// Names of the top-level properties a schema declares, in schema order.
pub fn declared_properties(schema: &Value) -> Vec<&str> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
