//! Route manifests

use super::record::read;
use super::{CapturedResponse, ConfigRecord, Meta, Parameters, Property, Scenario};
use routest_fs::path::normalize;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Properties of `routes/<name>_route/route.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteConfig {
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub name: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub description: Property<String>,

    /// HTTP method, one of the verbs the schema allows
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub method: Property<String>,

    /// Request path, relative to the application host
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub path: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub parameters: Property<Parameters>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub meta: Property<Meta>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub hooks: Property<Vec<String>>,

    /// Scenario files, relative to the manifest
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub scenarios: Property<Vec<String>>,
}

impl ConfigRecord for RouteConfig {
    const KIND: &'static str = "route";
    const PROPERTIES: &'static [&'static str] = &[
        "name",
        "description",
        "method",
        "path",
        "parameters",
        "meta",
        "hooks",
        "scenarios",
    ];

    fn assign(&mut self, property: &str, value: &Value) -> serde_json::Result<()> {
        match property {
            "name" => self.name = read(value)?,
            "description" => self.description = read(value)?,
            "method" => self.method = read(value)?,
            "path" => self.path = read(value)?,
            "parameters" => self.parameters = read(value)?,
            "meta" => self.meta = read(value)?,
            "hooks" => self.hooks = read(value)?,
            "scenarios" => self.scenarios = read(value)?,
            _ => {}
        }
        Ok(())
    }
}

/// A route together with the scenarios it declares.
#[derive(Debug, Clone)]
pub struct Route {
    pub config: RouteConfig,

    /// The manifest this route was read from
    pub source: PathBuf,

    /// The application manifest this route inherited from
    pub parent_source: PathBuf,

    /// Scenarios in the order the manifest lists them
    pub scenarios: Vec<Scenario>,

    /// Filled in by whatever executes the route
    pub response: Option<CapturedResponse>,
}

impl Route {
    pub fn new(config: RouteConfig, source: PathBuf, parent_source: PathBuf) -> Self {
        Self {
            config,
            source,
            parent_source,
            scenarios: Vec::new(),
            response: None,
        }
    }

    pub fn name(&self) -> &str {
        self.config.name.get().map(String::as_str).unwrap_or_default()
    }

    /// The scenario files this route declares, resolved against the
    /// manifest's directory, in manifest order.
    pub fn scenario_paths(&self) -> Vec<PathBuf> {
        let base = self.source.parent().unwrap_or_else(|| Path::new(""));
        self.config
            .scenarios
            .get()
            .map(|entries| entries.iter().map(|e| normalize(&base.join(e))).collect())
            .unwrap_or_default()
    }
}
