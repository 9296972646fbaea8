//! Path utility functions for normalization and comparison.
//!
//! Everything here is lexical: no filesystem access, no symlink resolution.
//! Target directories frequently do not exist yet when they are resolved.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Cannot pop past the root; keep the `..` for relative paths
                if !result.pop() {
                    result.push(component);
                }
            }
            _ => {
                result.push(component);
            }
        }
    }
    result
}

/// Check if a path is under a given directory by comparing normalized path components.
/// A path is considered under itself.
///
/// `/project/vendor/../etc` is NOT under `/project/vendor`.
pub fn is_path_under(path: &Path, dir: &Path) -> bool {
    let normalized_path = normalize_path(path);
    let normalized_dir = normalize_path(dir);

    let path_components: Vec<_> = normalized_path.components().collect();
    let dir_components: Vec<_> = normalized_dir.components().collect();

    if path_components.len() < dir_components.len() {
        return false;
    }

    dir_components
        .iter()
        .zip(path_components.iter())
        .all(|(d, p)| d == p)
}

/// Resolve a directory string taken from an `extra` block against the project root.
///
/// Leading and trailing `/` are trimmed first, so `"/web/assets/"` and
/// `"web/assets"` resolve to the same `<project_root>/web/assets`.
/// An empty value resolves to the project root itself.
pub fn resolve_config_path(project_root: &Path, value: &str) -> PathBuf {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        return normalize_path(project_root);
    }
    normalize_path(&project_root.join(trimmed))
}
