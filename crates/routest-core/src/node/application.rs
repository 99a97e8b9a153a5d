//! Application manifest and the loaded project tree

use super::record::read;
use super::{ConfigRecord, Meta, Parameters, Property, Route, Scenario};
use crate::config::{EnvironmentConfig, LoadOptions};
use crate::loader::ProjectLoader;
use crate::tags::TagExpression;
use crate::{Result, collector};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Properties of `app/app.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationConfig {
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub name: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub description: Property<String>,

    /// Base URL requests are sent to
    #[serde(skip_serializing_if = "Property::is_unset")]
    pub host: Property<String>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub parameters: Property<Parameters>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub meta: Property<Meta>,

    #[serde(skip_serializing_if = "Property::is_unset")]
    pub hooks: Property<Vec<String>>,
}

impl ConfigRecord for ApplicationConfig {
    const KIND: &'static str = "application";
    const PROPERTIES: &'static [&'static str] =
        &["name", "description", "host", "parameters", "meta", "hooks"];

    fn assign(&mut self, property: &str, value: &Value) -> serde_json::Result<()> {
        match property {
            "name" => self.name = read(value)?,
            "description" => self.description = read(value)?,
            "host" => self.host = read(value)?,
            "parameters" => self.parameters = read(value)?,
            "meta" => self.meta = read(value)?,
            "hooks" => self.hooks = read(value)?,
            _ => {}
        }
        Ok(())
    }
}

/// A loaded project: the application, its routes and their scenarios.
///
/// Routes and scenarios have already inherited parameters, metadata and
/// hooks from their parents by the time an `Application` is returned.
#[derive(Debug, Clone)]
pub struct Application {
    pub config: ApplicationConfig,

    /// Project root directory
    pub project: PathBuf,

    /// The manifest this application was read from
    pub source: PathBuf,

    /// Configuration for the selected environment, if one was selected
    pub environment: Option<EnvironmentConfig>,

    /// Routes in discovery order
    pub routes: Vec<Route>,
}

impl Application {
    /// Load the project rooted at `project`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use routest_core::{Application, LoadOptions};
    ///
    /// let app = Application::load("petstore", &LoadOptions::from_env())?;
    /// for scenario in app.filter_by_tags("smoke and not slow")? {
    ///     println!("{}", scenario.name());
    /// }
    /// ```
    pub fn load(project: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        ProjectLoader::new(options.clone()).load(project.as_ref())
    }

    pub fn name(&self) -> &str {
        self.config.name.get().map(String::as_str).unwrap_or_default()
    }

    /// Find a route by its declared name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name() == name)
    }

    /// Every scenario of every route, in load order.
    pub fn scenarios(&self) -> Vec<&Scenario> {
        collector::collect(self)
    }

    /// Scenarios whose tags satisfy `query`, in load order.
    pub fn filter_by_tags(&self, query: &str) -> Result<Vec<&Scenario>> {
        let expression = TagExpression::parse(query)?;
        Ok(expression.filter(&self.scenarios()))
    }
}
