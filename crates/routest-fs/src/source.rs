//! Format-aware document sources
//!
//! A [`DocumentSource`] turns a path into a generic `serde_json::Value` tree.
//! The filesystem implementation detects the format from the file extension.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Document formats understood by routest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    /// `KEY=value` lines, read into a flat object of strings.
    DotEnv,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.env`, `<name>.env` -> dotenv
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.file_name().is_some_and(|name| name == ".env") {
            return Ok(Self::DotEnv);
        }
        let extension = extension_of(path);
        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "env" => Ok(Self::DotEnv),
            _ => Err(unsupported(path, extension)),
        }
    }

    /// Detect the format of a `$ref` target.
    ///
    /// References may only point at JSON or YAML files.
    pub fn for_reference(path: &Path) -> Result<Self> {
        match Self::from_path(path)? {
            Self::Toml | Self::DotEnv => Err(unsupported(path, extension_of(path))),
            format => Ok(format),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::DotEnv => "dotenv",
        }
    }

    /// Parse text in this format into a generic tree.
    pub fn parse(&self, content: &str, path: &Path) -> Result<Value> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::DotEnv => parse_dotenv(content),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        })
    }
}

/// Read dotenv lines without touching the process environment.
fn parse_dotenv(content: &str) -> std::result::Result<Value, String> {
    let mut vars = Map::new();
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = item.map_err(|e| e.to_string())?;
        vars.insert(key, Value::String(value));
    }
    Ok(Value::Object(vars))
}

fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

fn unsupported(path: &Path, extension: &str) -> Error {
    Error::UnsupportedReferenceFormat {
        path: path.to_path_buf(),
        extension: extension.to_string(),
    }
}

/// Anything that can produce a parsed document for a path.
pub trait DocumentSource {
    /// Load and parse the document at `path`.
    ///
    /// A missing document is reported as [`Error::InvalidPath`].
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for FsSource {
    fn load(&self, path: &Path) -> Result<Value> {
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::InvalidPath {
                path: path.to_path_buf(),
            },
            _ => Error::io(path, e),
        })?;
        tracing::trace!(?path, format = format.name(), "Parsing document");
        format.parse(&content, path)
    }
}
