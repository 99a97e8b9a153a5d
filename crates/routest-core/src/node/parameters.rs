//! Value types shared by applications, routes and scenarios

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Free-form metadata. The `tags` entry feeds scenario filtering.
pub type Meta = Map<String, Value>;

/// A keyed request parameter (header, path variable or query parameter).
///
/// `key` identifies the entry when parameter lists cascade between levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,

    #[serde(default)]
    pub value: Value,

    /// Any further fields the document carries, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// The three keyed parameter lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub headers: Vec<Parameter>,

    #[serde(default)]
    pub path_variables: Vec<Parameter>,

    #[serde(default)]
    pub query_params: Vec<Parameter>,
}

impl Parameters {
    /// The lists paired with their section names, in a fixed order.
    pub fn lists(&self) -> [(&'static str, &Vec<Parameter>); 3] {
        [
            ("headers", &self.headers),
            ("path_variables", &self.path_variables),
            ("query_params", &self.query_params),
        ]
    }

    pub fn lists_mut(&mut self) -> [(&'static str, &mut Vec<Parameter>); 3] {
        [
            ("headers", &mut self.headers),
            ("path_variables", &mut self.path_variables),
            ("query_params", &mut self.query_params),
        ]
    }
}

/// A response captured by whatever executes the request.
///
/// The core never fills this in; it only reserves the slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedResponse {
    pub status: u16,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub body: Value,
}
