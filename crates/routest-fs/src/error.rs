//! Error types for routest-fs

use std::path::PathBuf;

/// Result type for routest-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    #[error("Failed to parse {format} document at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported format '{extension}' for {path}")]
    UnsupportedReferenceFormat { path: PathBuf, extension: String },

    #[error("Reference resolution exceeded depth {limit} at {path}")]
    ResolutionDepthExceeded { path: PathBuf, limit: usize },

    #[error("Cyclic reference to {path} (via {chain})")]
    CyclicReference { path: PathBuf, chain: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
