//! Resolved schema cache

use super::SchemaValidator;
use crate::{Error, Result};
use jsonschema::Validator;
use routest_fs::{DEFAULT_MAX_DEPTH, DocumentSource, FsSource, ReferenceResolver};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the application schema inside the schema directory.
pub const APP_SCHEMA: &str = "app_schema.yaml";
/// File name of the route schema inside the schema directory.
pub const ROUTE_SCHEMA: &str = "route_schema.yaml";
/// File name of the scenario schema inside the schema directory.
pub const SCENARIO_SCHEMA: &str = "scenario_schema.yaml";

/// A resolved schema tree together with its compiled validator.
#[derive(Clone)]
pub struct CompiledSchema {
    tree: Arc<Value>,
    validator: Arc<Validator>,
}

impl CompiledSchema {
    pub fn tree(&self) -> &Arc<Value> {
        &self.tree
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

/// Loads schemas, resolves their references and checks them against the
/// meta-schema.
///
/// Each schema file is resolved and compiled once; later requests share the
/// same tree and validator. The cache belongs to the store, and a store
/// belongs to one project load.
pub struct SchemaStore {
    schema_dir: PathBuf,
    source: Arc<dyn DocumentSource>,
    max_depth: usize,
    validator: SchemaValidator,
    cache: HashMap<PathBuf, CompiledSchema>,
}

impl SchemaStore {
    /// Create a store reading schemas from `schema_dir` on the filesystem.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self::with_source(schema_dir, Arc::new(FsSource::new()))
    }

    pub fn with_source(schema_dir: impl Into<PathBuf>, source: Arc<dyn DocumentSource>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            source,
            max_depth: DEFAULT_MAX_DEPTH,
            validator: SchemaValidator::new(),
            cache: HashMap::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Get the resolved schema stored under `name` in the schema directory.
    pub fn get(&mut self, name: &str) -> Result<Arc<Value>> {
        self.compiled(name).map(|schema| schema.tree)
    }

    /// Get the schema stored under `name` along with its compiled validator.
    pub fn compiled(&mut self, name: &str) -> Result<CompiledSchema> {
        let path = self.schema_dir.join(name);
        self.load_compiled(&path)
    }

    /// Load, resolve and meta-validate the schema at `path`.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Value>> {
        self.load_compiled(path).map(|schema| schema.tree)
    }

    fn load_compiled(&mut self, path: &Path) -> Result<CompiledSchema> {
        if let Some(schema) = self.cache.get(path) {
            return Ok(schema.clone());
        }

        tracing::debug!(?path, "Resolving schema");
        let tree = ReferenceResolver::new(self.source.as_ref())
            .with_max_depth(self.max_depth)
            .resolve_file(path)
            .map_err(Error::from_fs)?;
        let validator = self.validator.compile_schema(&tree, path)?;

        let schema = CompiledSchema {
            tree: Arc::new(tree),
            validator: Arc::new(validator),
        };
        self.cache.insert(path.to_path_buf(), schema.clone());
        Ok(schema)
    }
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("schema_dir", &self.schema_dir)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
