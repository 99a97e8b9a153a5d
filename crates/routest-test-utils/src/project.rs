//! [`TestProject`] builder for on-disk routest projects.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out the
/// application, routes, scenarios and environment files.
///
/// Every helper takes YAML (or other document) text verbatim and returns the
/// path it wrote, so tests can assert on source paths.
///
/// # Example
///
/// ```rust,no_run
/// use routest_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_app("name: petstore\nhooks: [auth]\n");
/// project.add_route("pets", "name: pets\nmethod: GET\npath: /pets\nscenarios: [list.yaml]\n");
/// project.add_scenario("pets", "list.yaml", "name: list pets\n");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A small but complete project: one application, two routes and three
    /// scenarios, tagged for filter tests.
    ///
    /// | scenario        | route  | tags                 |
    /// |-----------------|--------|----------------------|
    /// | `list pets`     | pets   | smoke                |
    /// | `create pet`    | pets   | regression, slow     |
    /// | `get order`     | orders | smoke, regression    |
    pub fn petstore() -> Self {
        let project = Self::new();
        project.write_app(
            "name: petstore\n\
             host: https://petstore.example.com\n\
             parameters:\n  headers:\n    - key: Accept\n      value: application/json\n\
             meta:\n  env: [qa]\n\
             hooks: [auth]\n",
        );
        project.add_route(
            "pets",
            "name: pets\nmethod: GET\npath: /pets\nscenarios:\n  - list.yaml\n  - create.yaml\n",
        );
        project.add_scenario("pets", "list.yaml", "name: list pets\nmeta:\n  tags: [smoke]\n");
        project.add_scenario(
            "pets",
            "create.yaml",
            "name: create pet\nexpected_status: 201\nmeta:\n  tags: [regression, slow]\n",
        );
        project.add_route(
            "orders",
            "name: orders\nmethod: GET\npath: /orders/{id}\nscenarios: [get.yaml]\n",
        );
        project.add_scenario(
            "orders",
            "get.yaml",
            "name: get order\nmeta:\n  tags: [smoke, regression]\n",
        );
        project
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` (relative to the root), creating parent
    /// directories.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
        full_path
    }

    /// Write `app/app.yaml`.
    pub fn write_app(&self, yaml: &str) -> PathBuf {
        self.write_file("app/app.yaml", yaml)
    }

    /// Write `routes/<name>_route/route.yaml`.
    pub fn add_route(&self, name: &str, yaml: &str) -> PathBuf {
        self.write_file(&format!("routes/{name}_route/route.yaml"), yaml)
    }

    /// Write a scenario file inside `routes/<route>_route/`.
    pub fn add_scenario(&self, route: &str, file: &str, yaml: &str) -> PathBuf {
        self.write_file(&format!("routes/{route}_route/{file}"), yaml)
    }

    /// Write `config/<environment>.<extension>`.
    pub fn write_config(&self, environment: &str, extension: &str, content: &str) -> PathBuf {
        self.write_file(&format!("config/{environment}.{extension}"), content)
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
