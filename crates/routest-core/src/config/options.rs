//! Options controlling how a project is loaded

use routest_fs::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;

/// Environment variable naming the selected environment.
pub const ENVIRONMENT_VAR: &str = "ROUTEST_ENV";

/// Environment variable overriding the schema directory.
pub const SCHEMA_DIR_VAR: &str = "ROUTEST_SCHEMA_DIR";

/// The schema directory shipped with this crate.
pub fn default_schema_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/schema"))
}

/// Options for loading a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Directory holding `app_schema.yaml`, `route_schema.yaml` and
    /// `scenario_schema.yaml`
    pub schema_dir: PathBuf,

    /// Selected environment; `None` skips environment configuration
    pub environment: Option<String>,

    /// Maximum number of files nested through `$ref` markers
    pub max_reference_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            environment: None,
            max_reference_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from `ROUTEST_ENV` and `ROUTEST_SCHEMA_DIR`.
    ///
    /// Meant to be called once at the process boundary; nothing inside the
    /// core reads the environment.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(environment) = non_empty_var(ENVIRONMENT_VAR) {
            options.environment = Some(environment);
        }
        if let Some(dir) = non_empty_var(SCHEMA_DIR_VAR) {
            options.schema_dir = PathBuf::from(dir);
        }
        tracing::debug!(?options, "Load options from environment");
        options
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_schema_dir(mut self, schema_dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = schema_dir.into();
        self
    }

    pub fn with_max_reference_depth(mut self, depth: usize) -> Self {
        self.max_reference_depth = depth;
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
