//! Document loading for routest
//!
//! Reads YAML/JSON/TOML documents into `serde_json::Value` trees and resolves
//! `$ref` markers that point at other files.

pub mod constants;
pub mod error;
pub mod loader;
pub mod path;
pub mod reference;
pub mod source;

pub use constants::{ProjectPath, ROUTE_DIR_SUFFIX};
pub use error::{Error, Result};
pub use loader::DocumentLoader;
pub use reference::{DEFAULT_MAX_DEPTH, REF_KEY, ReferenceResolver};
pub use source::{DocumentSource, Format, FsSource};
