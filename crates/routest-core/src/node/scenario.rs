//! Scenario documents

use super::record::read;
use super::{CapturedResponse, ConfigRecord, Meta, Parameters, Property};
use crate::tags::{TagSet, Tagged};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Properties of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioConfig {
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub name: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub description: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub parameters: Property<Parameters>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub meta: Property<Meta>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub hooks: Property<Vec<String>>,

    /// Request body sent with the scenario
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub body: Property<Value>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub expected_status: Property<u16>,
}

impl ConfigRecord for ScenarioConfig {
    const KIND: &'static str = "scenario";
    const PROPERTIES: &'static [&'static str] = &[
        "name",
        "description",
        "parameters",
        "meta",
        "hooks",
        "body",
        "expected_status",
    ];

    fn assign(&mut self, property: &str, value: &Value) -> serde_json::Result<()> {
        match property {
            "name" => self.name = read(value)?,
            "description" => self.description = read(value)?,
            "parameters" => self.parameters = read(value)?,
            "meta" => self.meta = read(value)?,
            "hooks" => self.hooks = read(value)?,
            "body" => self.body = read(value)?,
            "expected_status" => self.expected_status = read(value)?,
            _ => {}
        }
        Ok(())
    }
}

/// A scenario after inheritance, with its tag set fixed.
///
/// The configuration is read-only once the scenario exists, so the tag set
/// derived from `meta.tags` can never drift from it.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: ScenarioConfig,
    source: PathBuf,
    parent_source: PathBuf,
    tags: TagSet,

    /// Filled in by whatever executes the scenario
    pub response: Option<CapturedResponse>,
}

impl Scenario {
    /// Wrap a fully merged configuration.
    pub fn new(config: ScenarioConfig, source: PathBuf, parent_source: PathBuf) -> Self {
        let tags = TagSet::from_meta(config.meta.get());
        Self {
            config,
            source,
            parent_source,
            tags,
            response: None,
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.name.get().map(String::as_str).unwrap_or_default()
    }

    /// The file this scenario was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The route manifest this scenario inherited from
    pub fn parent_source(&self) -> &Path {
        &self.parent_source
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl Tagged for Scenario {
    fn tag_set(&self) -> &TagSet {
        &self.tags
    }
}
