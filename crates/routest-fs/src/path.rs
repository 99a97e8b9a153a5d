//! Path helpers used while following references

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, folding `.` and `..` components.
///
/// Does not touch the filesystem. A `..` that would climb above the start of
/// a relative path is kept so that the result still points at the same place.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Identity of a file for cycle detection.
///
/// Uses the canonical filesystem path when the file exists so that symlinks
/// and differently spelled paths collapse to one key, and falls back to the
/// lexical form otherwise.
pub fn identity(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| normalize(path))
}

/// Whether a reference string is relative to the referring document.
pub fn is_relative_reference(target: &str) -> bool {
    target.starts_with("./") || target.starts_with("../")
}

/// Locate a reference target, joining relative targets onto `base_dir`.
pub fn locate(base_dir: &Path, target: &str) -> PathBuf {
    if is_relative_reference(target) {
        normalize(&base_dir.join(target))
    } else {
        PathBuf::from(target)
    }
}
