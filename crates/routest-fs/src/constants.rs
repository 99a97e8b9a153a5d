//! Constants and enums for project filesystem paths.

use std::path::Path;

/// Suffix a directory name under `routes/` must carry to count as a route.
pub const ROUTE_DIR_SUFFIX: &str = "_route";

/// Standard project filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `app` directory holding the application manifest
    AppDir,
    /// The application manifest inside `app/`
    AppManifest,
    /// The `routes` directory holding `<name>_route` directories
    RoutesDir,
    /// The manifest every route directory must contain
    RouteManifest,
    /// The `config` directory holding per-environment files
    ConfigDir,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppDir => "app",
            Self::AppManifest => "app.yaml",
            Self::RoutesDir => "routes",
            Self::RouteManifest => "route.yaml",
            Self::ConfigDir => "config",
        }
    }

    /// Resolve this marker against a project root.
    ///
    /// `AppManifest` resolves to `<root>/app/app.yaml`; the route manifest has
    /// no fixed location and resolves to `<root>/route.yaml`.
    pub fn under(&self, root: &Path) -> std::path::PathBuf {
        match self {
            Self::AppManifest => root.join(Self::AppDir.as_str()).join(self.as_str()),
            _ => root.join(self.as_str()),
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
