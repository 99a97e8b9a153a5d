//! Locating route manifests under a project's `routes/` directory

use crate::Result;
use routest_fs::{Error as FsError, ProjectPath, ROUTE_DIR_SUFFIX};
use std::path::{Path, PathBuf};

/// Finds the route manifests of a project.
///
/// Implemented for closures, so tests and embedders can supply a fixed list:
///
/// ```ignore
/// let fixed = |_: &Path| Ok::<_, Error>(vec![PathBuf::from("/p/routes/pets_route/route.yaml")]);
/// let loader = ProjectLoader::new(options).with_discovery(fixed);
/// ```
pub trait RouteDiscovery {
    /// Return the manifest paths of every route under `routes_dir`, in the
    /// order routes should be loaded.
    fn discover(&self, routes_dir: &Path) -> Result<Vec<PathBuf>>;
}

impl<F> RouteDiscovery for F
where
    F: Fn(&Path) -> Result<Vec<PathBuf>>,
{
    fn discover(&self, routes_dir: &Path) -> Result<Vec<PathBuf>> {
        self(routes_dir)
    }
}

/// Directory-based discovery.
///
/// A route is a sub-directory whose name ends in `_route` and that contains
/// a `route.yaml` manifest. Routes are returned sorted by directory name; a
/// missing `routes/` directory means the project has no routes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDiscovery;

impl FsDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl RouteDiscovery for FsDiscovery {
    fn discover(&self, routes_dir: &Path) -> Result<Vec<PathBuf>> {
        if !routes_dir.is_dir() {
            tracing::debug!(?routes_dir, "No routes directory");
            return Ok(Vec::new());
        }

        let mut entries: Vec<_> = std::fs::read_dir(routes_dir)
            .map_err(|e| FsError::io(routes_dir, e))?
            .flatten()
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(ROUTE_DIR_SUFFIX))
            })
            .filter(|e| e.path().is_dir())
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut manifests = Vec::with_capacity(entries.len());
        for entry in entries {
            let manifest = entry.path().join(ProjectPath::RouteManifest);
            if manifest.is_file() {
                manifests.push(manifest);
            } else {
                tracing::debug!(dir = ?entry.path(), "Skipping route directory without manifest");
            }
        }
        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_suffixed_directories_with_manifest_sorted() {
        let temp = TempDir::new().unwrap();
        let routes = temp.path().join("routes");
        for dir in ["users_route", "pets_route", "orders_route", "helpers", "empty_route"] {
            fs::create_dir_all(routes.join(dir)).unwrap();
        }
        for dir in ["users_route", "pets_route", "orders_route", "helpers"] {
            fs::write(routes.join(dir).join("route.yaml"), "name: x\n").unwrap();
        }
        // a file with the suffix is not a route
        fs::write(routes.join("stray_route"), "").unwrap();

        let found = FsDiscovery::new().discover(&routes).unwrap();

        assert_eq!(
            found,
            vec![
                routes.join("orders_route/route.yaml"),
                routes.join("pets_route/route.yaml"),
                routes.join("users_route/route.yaml"),
            ]
        );
    }

    #[test]
    fn missing_routes_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let found = FsDiscovery.discover(&temp.path().join("routes")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn closures_are_discoveries() {
        let fixed = |dir: &Path| Ok::<_, crate::Error>(vec![dir.join("a_route/route.yaml")]);
        let found = fixed.discover(Path::new("/p/routes")).unwrap();
        assert_eq!(found, vec![PathBuf::from("/p/routes/a_route/route.yaml")]);
    }
}
