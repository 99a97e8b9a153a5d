//! `$ref` resolution across files
//!
//! A reference marker is a mapping carrying a `$ref` key whose value is a
//! path string. Resolution replaces the whole mapping with the contents of
//! the referenced file, which is itself resolved first:
//!
//! ```text
//! parameters:                  parameters:
//!   $ref: ./parameters.yaml -->   headers: [...]
//!                                 query_params: [...]
//! ```
//!
//! Relative targets (`./`, `../`) are interpreted against the directory of
//! the document that contains the marker, so a nested file's own references
//! resolve against that nested file's directory. Targets starting with `#`
//! are JSON Schema internal pointers and are left alone.

use crate::path::{identity, locate};
use crate::source::{DocumentSource, Format};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// The key that marks a mapping as a reference.
pub const REF_KEY: &str = "$ref";

/// Default bound on how many files may be nested inside one another.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Resolves `$ref` markers depth-first, loading files through a
/// [`DocumentSource`].
pub struct ReferenceResolver<'s> {
    source: &'s dyn DocumentSource,
    max_depth: usize,
}

impl<'s> ReferenceResolver<'s> {
    pub fn new(source: &'s dyn DocumentSource) -> Self {
        Self {
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Bound the number of files that may be open on the resolution stack.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve every reference inside an in-memory tree.
    ///
    /// `base_dir` is the directory relative targets are joined onto. A tree
    /// without markers comes back unchanged.
    pub fn resolve(&self, base_dir: &Path, tree: Value) -> Result<Value> {
        let mut stack = Vec::new();
        self.resolve_node(base_dir, tree, &mut stack)
    }

    /// Load the document at `path` and resolve its references.
    ///
    /// The file itself is placed on the resolution stack, so a reference
    /// chain leading back to it is reported as a cycle.
    pub fn resolve_file(&self, path: &Path) -> Result<Value> {
        let mut stack = Vec::new();
        self.descend(path, &mut stack)
    }

    fn resolve_node(&self, base_dir: &Path, node: Value, stack: &mut Vec<PathBuf>) -> Result<Value> {
        match node {
            Value::Object(map) => {
                if let Some(target) = reference_target(&map) {
                    let path = locate(base_dir, target);
                    tracing::trace!(?path, "Following reference");
                    Format::for_reference(&path)?;
                    return self.descend(&path, stack);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, value) in map {
                    let value = self.resolve_node(base_dir, value, stack)?;
                    resolved.insert(key, value);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.resolve_node(base_dir, item, stack))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar),
        }
    }

    fn descend(&self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<Value> {
        let key = identity(path);
        if stack.contains(&key) {
            let chain = stack
                .iter()
                .chain(std::iter::once(&key))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::CyclicReference {
                path: path.to_path_buf(),
                chain,
            });
        }
        if stack.len() >= self.max_depth {
            return Err(Error::ResolutionDepthExceeded {
                path: path.to_path_buf(),
                limit: self.max_depth,
            });
        }

        let tree = self.source.load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        stack.push(key);
        let resolved = self.resolve_node(base_dir, tree, stack);
        stack.pop();
        resolved
    }
}

/// Return the path a marker points at, or `None` if `map` is not a file
/// reference.
fn reference_target(map: &Map<String, Value>) -> Option<&str> {
    let target = map.get(REF_KEY)?.as_str()?;
    if target.starts_with('#') {
        None
    } else {
        Some(target)
    }
}
