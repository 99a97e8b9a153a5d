//! Error types for routest-core

use std::path::PathBuf;

/// Result type for routest-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a project or filtering scenarios
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Schema or data path does not exist
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Schema failed the meta-schema check or could not be compiled
    #[error("Invalid schema {path}: {message}")]
    SchemaError { path: PathBuf, message: String },

    /// Data document does not conform to its schema
    #[error("Invalid data in {path} at '{instance_path}' ({rule}): {message}")]
    ValidationError {
        path: PathBuf,
        instance_path: String,
        rule: String,
        message: String,
    },

    /// Schema declares a property the typed record has no field for
    #[error("Schema for {path} declares unknown {kind} property '{property}'")]
    UnknownSchemaProperty {
        path: PathBuf,
        kind: &'static str,
        property: String,
    },

    /// Environment configuration could not be selected or loaded
    #[error("Environment '{environment}' config error: {message}")]
    EnvironmentConfig { environment: String, message: String },

    /// Tag query could not be parsed
    #[error("Malformed tag expression '{expression}': {reason}")]
    MalformedTagExpression { expression: String, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Document loading error from routest-fs
    #[error(transparent)]
    Fs(#[from] routest_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Lift a routest-fs error, surfacing missing documents as
    /// [`Error::InvalidPath`].
    pub(crate) fn from_fs(err: routest_fs::Error) -> Self {
        match err {
            routest_fs::Error::InvalidPath { path } => Self::InvalidPath { path },
            other => Self::Fs(other),
        }
    }

    pub(crate) fn malformed(expression: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTagExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
