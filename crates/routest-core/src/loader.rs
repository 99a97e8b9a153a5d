//! Building the project tree from disk
//!
//! Loading is strictly top-down. For every document the loader:
//!
//! 1. resolves the kind's schema (cached for the lifetime of the loader)
//! 2. loads the document, expanding `$ref` markers
//! 3. validates the document against the schema
//! 4. builds the typed record
//! 5. merges in the parent's parameters, metadata and hooks
//!
//! Any failure aborts the load; no partially built tree is returned.

use crate::config::{EnvironmentConfig, LoadOptions};
use crate::discovery::{FsDiscovery, RouteDiscovery};
use crate::hierarchy;
use crate::node::{Application, ApplicationConfig, ConfigRecord, Route, RouteConfig, Scenario, ScenarioConfig};
use crate::schema::{APP_SCHEMA, ROUTE_SCHEMA, SCENARIO_SCHEMA, SchemaStore, SchemaValidator};
use crate::{Error, Result};
use routest_fs::{DocumentLoader, DocumentSource, FsSource, ProjectPath};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Loads projects according to a set of [`LoadOptions`].
///
/// Schemas are always read from the filesystem. Data documents and
/// environment files go through the [`DocumentSource`] given to
/// [`with_source`](Self::with_source), which defaults to the filesystem.
pub struct ProjectLoader {
    options: LoadOptions,
    schemas: SchemaStore,
    documents: DocumentLoader,
    validator: SchemaValidator,
    discovery: Box<dyn RouteDiscovery>,
}

impl ProjectLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self::with_source(options, Arc::new(FsSource::new()))
    }

    pub fn with_source(options: LoadOptions, source: Arc<dyn DocumentSource>) -> Self {
        let schemas =
            SchemaStore::new(&options.schema_dir).with_max_depth(options.max_reference_depth);
        let documents =
            DocumentLoader::with_source(source).with_max_depth(options.max_reference_depth);
        Self {
            options,
            schemas,
            documents,
            validator: SchemaValidator::new(),
            discovery: Box::new(FsDiscovery::new()),
        }
    }

    /// Replace the route discovery strategy.
    pub fn with_discovery(mut self, discovery: impl RouteDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load the project rooted at `project`.
    pub fn load(&mut self, project: &Path) -> Result<Application> {
        if !project.is_dir() {
            return Err(Error::InvalidPath {
                path: project.to_path_buf(),
            });
        }
        let _span = tracing::debug_span!("load_project", project = %project.display()).entered();

        let app_source = ProjectPath::AppManifest.under(project);
        let config: ApplicationConfig = self.load_record(APP_SCHEMA, &app_source)?;
        tracing::debug!(name = ?config.name.get(), "Loaded application");

        let environment = match &self.options.environment {
            Some(name) => Some(EnvironmentConfig::load(
                project,
                name,
                &**self.documents.source(),
            )?),
            None => None,
        };

        let manifests = self
            .discovery
            .discover(&ProjectPath::RoutesDir.under(project))?;
        let mut routes = Vec::with_capacity(manifests.len());
        for manifest in &manifests {
            routes.push(self.load_route(manifest, &config, &app_source)?);
        }

        tracing::debug!(routes = routes.len(), "Loaded project");
        Ok(Application {
            config,
            project: project.to_path_buf(),
            source: app_source,
            environment,
            routes,
        })
    }

    fn load_route(
        &mut self,
        manifest: &Path,
        app: &ApplicationConfig,
        app_source: &Path,
    ) -> Result<Route> {
        let _span = tracing::debug_span!("route", source = %manifest.display()).entered();

        let mut config: RouteConfig = self.load_record(ROUTE_SCHEMA, manifest)?;
        hierarchy::inherit(&mut config, app);

        let mut route = Route::new(config, manifest.to_path_buf(), app_source.to_path_buf());
        for path in route.scenario_paths() {
            let scenario = self.load_scenario(&path, &route)?;
            route.scenarios.push(scenario);
        }

        tracing::debug!(
            name = route.name(),
            scenarios = route.scenarios.len(),
            "Loaded route"
        );
        Ok(route)
    }

    fn load_scenario(&mut self, path: &Path, route: &Route) -> Result<Scenario> {
        let _span = tracing::trace_span!("scenario", source = %path.display()).entered();

        let mut config: ScenarioConfig = self.load_record(SCENARIO_SCHEMA, path)?;
        hierarchy::inherit(&mut config, &route.config);
        Ok(Scenario::new(config, path.to_path_buf(), route.source.clone()))
    }

    fn load_record<R: ConfigRecord>(&mut self, schema_name: &str, path: &Path) -> Result<R> {
        let schema = self.schemas.compiled(schema_name)?;
        let data = self.documents.load(path).map_err(Error::from_fs)?;
        self.validator
            .validate_compiled(schema.validator(), &data, path)?;
        R::from_validated(schema.tree(), &data, path)
    }
}

impl fmt::Debug for ProjectLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectLoader")
            .field("options", &self.options)
            .field("schemas", &self.schemas)
            .field("documents", &self.documents)
            .finish_non_exhaustive()
    }
}
