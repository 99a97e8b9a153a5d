//! Typed records built from validated documents

use super::Property;
use crate::schema::declared_properties;
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// A closed set of fields, one per property a document kind may declare.
///
/// Implementors list every property they understand in `PROPERTIES` and
/// copy a document value into the matching field in [`assign`].
///
/// [`assign`]: ConfigRecord::assign
pub trait ConfigRecord: Default {
    /// Document kind, used in diagnostics (`application`, `route`, ...)
    const KIND: &'static str;

    /// Every property this record has a field for
    const PROPERTIES: &'static [&'static str];

    /// Store `value` in the field for `property`.
    ///
    /// Only called for names listed in `PROPERTIES`.
    fn assign(&mut self, property: &str, value: &Value) -> serde_json::Result<()>;

    /// Build a record from a schema and a document already validated against
    /// it.
    ///
    /// Every schema-declared property starts unset; document keys matching a
    /// declared property overwrite it, other keys are ignored. A schema that
    /// declares a property this record has no field for is rejected.
    fn from_validated(schema: &Value, data: &Value, source: &Path) -> Result<Self> {
        let declared = declared_properties(schema);
        if let Some(unknown) = declared.iter().find(|p| !Self::PROPERTIES.contains(p)) {
            return Err(Error::UnknownSchemaProperty {
                path: source.to_path_buf(),
                kind: Self::KIND,
                property: unknown.to_string(),
            });
        }

        let mut record = Self::default();
        let Some(fields) = data.as_object() else {
            return Ok(record);
        };
        for (key, value) in fields {
            if !declared.contains(&key.as_str()) {
                tracing::trace!(kind = Self::KIND, key, "Ignoring undeclared property");
                continue;
            }
            record
                .assign(key, value)
                .map_err(|e| Error::ValidationError {
                    path: source.to_path_buf(),
                    instance_path: format!("/{key}"),
                    rule: "type".into(),
                    message: e.to_string(),
                })?;
        }
        Ok(record)
    }
}

/// Read a property, for use inside [`ConfigRecord::assign`].
pub(crate) fn read<T: serde::de::DeserializeOwned>(
    value: &Value,
) -> serde_json::Result<Property<T>> {
    Property::from_value(value)
}
