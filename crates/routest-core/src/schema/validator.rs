//! Draft 7 schema and data validation

use crate::{Error, Result};
use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::path::Path;

/// Validates schemas and the documents written against them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Whether `schema` is itself a well-formed Draft 7 schema.
    pub fn is_valid_schema(&self, schema: &Value) -> bool {
        compile(schema).is_ok()
    }

    /// Check `schema` against the Draft 7 meta-schema.
    ///
    /// `path` is only used to label the error.
    pub fn validate_schema(&self, schema: &Value, path: &Path) -> Result<()> {
        self.compile_schema(schema, path).map(drop)
    }

    /// Meta-validate `schema` and compile it for repeated use.
    pub fn compile_schema(&self, schema: &Value, path: &Path) -> Result<Validator> {
        compile(schema).map_err(|message| Error::SchemaError {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Check `data` against `schema`.
    ///
    /// Compiles `schema` on every call; use [`validate_compiled`] when the
    /// same schema checks many documents.
    ///
    /// [`validate_compiled`]: Self::validate_compiled
    pub fn validate_data(&self, data: &Value, schema: &Value, path: &Path) -> Result<()> {
        let compiled = self.compile_schema(schema, path)?;
        self.validate_compiled(&compiled, data, path)
    }

    /// Check `data` against an already compiled schema.
    ///
    /// Reports the first violation as [`Error::ValidationError`]; any further
    /// violations are logged at debug level.
    pub fn validate_compiled(&self, compiled: &Validator, data: &Value, path: &Path) -> Result<()> {
        let mut errors = compiled.iter_errors(data);
        let Some(first) = errors.next() else {
            return Ok(());
        };
        for extra in errors {
            tracing::debug!(?path, instance_path = %extra.instance_path, "Additional violation: {}", extra);
        }

        let schema_path = first.schema_path.to_string();
        Err(Error::ValidationError {
            path: path.to_path_buf(),
            instance_path: first.instance_path.to_string(),
            rule: rule_name(&schema_path).to_string(),
            message: first.to_string(),
        })
    }
}

fn compile(schema: &Value) -> std::result::Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(schema)
        .map_err(|e| e.to_string())
}

/// The keyword that failed, taken from the end of the schema path
/// (`/properties/method/enum` -> `enum`).
fn rule_name(schema_path: &str) -> &str {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && segment.parse::<usize>().is_err())
        .unwrap_or("schema")
}
