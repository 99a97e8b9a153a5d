//! Loading data documents with their references resolved

use crate::reference::{DEFAULT_MAX_DEPTH, ReferenceResolver};
use crate::source::{DocumentSource, FsSource};
use crate::Result;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Loads data documents and resolves their `$ref` markers.
///
/// The loader owns no cache: every call reads from the source again, so the
/// returned tree is always the caller's to keep.
#[derive(Clone)]
pub struct DocumentLoader {
    source: Arc<dyn DocumentSource>,
    max_depth: usize,
}

impl DocumentLoader {
    /// Create a loader that reads from the local filesystem.
    pub fn new() -> Self {
        Self::with_source(Arc::new(FsSource::new()))
    }

    /// Create a loader over a custom source.
    pub fn with_source(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The source this loader reads through.
    pub fn source(&self) -> &Arc<dyn DocumentSource> {
        &self.source
    }

    /// Load `path` and resolve every reference reachable from it.
    pub fn load(&self, path: &Path) -> Result<Value> {
        tracing::debug!(?path, "Loading document");
        ReferenceResolver::new(self.source.as_ref())
            .with_max_depth(self.max_depth)
            .resolve_file(path)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentLoader")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
