//! Core of the routest API-testing framework
//!
//! A routest project describes an HTTP API under test as a tree of YAML
//! documents:
//!
//! ```text
//! <project>/
//!   app/app.yaml                      application: host, shared parameters
//!   routes/<name>_route/route.yaml    one endpoint, lists its scenarios
//!   routes/<name>_route/*.yaml        scenarios: one request each
//!   config/<env>.yaml                 per-environment values
//! ```
//!
//! This crate turns that tree into typed nodes and selects scenarios by tag:
//!
//! - **Schemas**: Draft 7 schemas, split across files with `$ref`, resolved
//!   and checked by [`SchemaStore`] and [`SchemaValidator`]
//! - **Nodes**: [`Application`], [`Route`] and [`Scenario`] with typed
//!   records whose properties are explicitly set or unset
//! - **Cascading**: parameters, metadata and hooks flow from parent to child
//!   (see [`hierarchy`])
//! - **Selection**: [`collector::collect`] flattens the tree and
//!   [`TagExpression`] filters it
//!
//! # Architecture
//!
//! ```text
//!        Application::load / ProjectLoader
//!                     |
//!   +--------+--------+---------+-----------+
//!   |        |        |         |           |
//! schema   node   hierarchy  discovery    tags
//!   |
//! routest-fs (documents, $ref resolution)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use routest_core::{Application, LoadOptions, Result};
//!
//! fn smoke(project: &str) -> Result<()> {
//!     let app = Application::load(project, &LoadOptions::from_env())?;
//!     for scenario in app.filter_by_tags("smoke and not slow")? {
//!         println!("{} ({})", scenario.name(), scenario.source().display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod discovery;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod logging;
pub mod node;
pub mod schema;
pub mod tags;

pub use config::{EnvironmentConfig, LoadOptions};
pub use discovery::{FsDiscovery, RouteDiscovery};
pub use error::{Error, Result};
pub use hierarchy::Inheritable;
pub use loader::ProjectLoader;
pub use node::{
    Application, ApplicationConfig, CapturedResponse, ConfigRecord, Meta, Parameter, Parameters,
    Property, Route, RouteConfig, Scenario, ScenarioConfig,
};
pub use schema::{SchemaStore, SchemaValidator};
pub use tags::{TagExpression, TagSet, Tagged};
