//! Per-environment configuration files

use crate::{Error, Result};
use routest_fs::{DocumentSource, ProjectPath};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Configuration values for one environment, read from
/// `<project>/config/<environment>.<ext>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentConfig {
    /// Environment name, e.g. `qa`
    pub name: String,

    /// File the values were read from
    pub source: PathBuf,

    /// Parsed values
    pub values: Value,
}

impl EnvironmentConfig {
    /// Load the configuration for `environment` from a project root.
    ///
    /// Exactly one file whose stem equals the environment name must exist in
    /// `<project>/config/`; none or several is an error.
    pub fn load(project: &Path, environment: &str, source: &dyn DocumentSource) -> Result<Self> {
        let config_dir = ProjectPath::ConfigDir.under(project);
        let candidates = find_candidates(&config_dir, environment)?;

        let file = match candidates.as_slice() {
            [single] => single.clone(),
            [] => {
                return Err(Error::EnvironmentConfig {
                    environment: environment.to_string(),
                    message: format!("no config file found in {}", config_dir.display()),
                });
            }
            many => {
                return Err(Error::EnvironmentConfig {
                    environment: environment.to_string(),
                    message: format!("expected one config file, found {}", many.len()),
                });
            }
        };

        tracing::debug!(environment, ?file, "Loading environment config");
        let values = source.load(&file)?;
        Ok(Self {
            name: environment.to_string(),
            source: file,
            values,
        })
    }

    /// Look up a top-level value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

fn find_candidates(config_dir: &Path, environment: &str) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(config_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(routest_fs::Error::io(config_dir, e).into()),
    };

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| routest_fs::Error::io(config_dir, e))?.path();
        let stem_matches = path.file_stem().and_then(|s| s.to_str()) == Some(environment);
        if path.is_file() && stem_matches {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates)
}
