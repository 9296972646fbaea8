use std::path::{Path, PathBuf};

use crate::package::{PackageConfig, ProjectConfig};
use crate::runtime::resolve_config_path;

/// Effective target directory for a package.
///
/// Precedence, highest first:
/// 1. the project's `installer-paths` entry listing the package (last match wins)
/// 2. the package's own `target-dir`
/// 3. the default extraction directory (nothing to move)
pub fn resolve_target_dir(
    project_root: &Path,
    project: &ProjectConfig,
    package_name: &str,
    config: &PackageConfig,
    default_dir: &Path,
) -> PathBuf {
    if let Some(path) = project.installer_path_for(package_name) {
        return resolve_config_path(project_root, path);
    }
    if let Some(dir) = &config.target_dir {
        return resolve_config_path(project_root, dir);
    }
    default_dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(entries: Vec<(&str, Vec<&str>)>) -> ProjectConfig {
        ProjectConfig {
            installer_paths: entries
                .iter()
                .map(|(path, names)| {
                    (
                        path.to_string(),
                        names.iter().map(|n| n.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn package_config(target_dir: Option<&str>) -> PackageConfig {
        PackageConfig {
            target_dir: target_dir.map(String::from),
            omit_first_directory: false,
        }
    }

    const ROOT: &str = "/project";
    const DEFAULT: &str = "/project/vendor/acme/widget";

    #[test]
    fn test_default_when_unconfigured() {
        let target = resolve_target_dir(
            Path::new(ROOT),
            &ProjectConfig::default(),
            "acme/widget",
            &package_config(None),
            Path::new(DEFAULT),
        );
        assert_eq!(target, PathBuf::from(DEFAULT));
    }

    #[test]
    fn test_package_target_dir() {
        let target = resolve_target_dir(
            Path::new(ROOT),
            &ProjectConfig::default(),
            "acme/widget",
            &package_config(Some("vendor/acme")),
            Path::new(DEFAULT),
        );
        assert_eq!(target, PathBuf::from("/project/vendor/acme"));
    }

    #[test]
    fn test_installer_paths_beat_target_dir() {
        let target = resolve_target_dir(
            Path::new(ROOT),
            &project(vec![("web/assets/", vec!["acme/widget"])]),
            "acme/widget",
            &package_config(Some("vendor/acme")),
            Path::new(DEFAULT),
        );
        assert_eq!(target, PathBuf::from("/project/web/assets"));
    }

    #[test]
    fn test_installer_paths_for_other_package_ignored() {
        let target = resolve_target_dir(
            Path::new(ROOT),
            &project(vec![("web/assets/", vec!["acme/gadget"])]),
            "acme/widget",
            &package_config(Some("vendor/acme")),
            Path::new(DEFAULT),
        );
        assert_eq!(target, PathBuf::from("/project/vendor/acme"));
    }

    #[test]
    fn test_installer_paths_last_match_wins() {
        let target = resolve_target_dir(
            Path::new(ROOT),
            &project(vec![("first/", vec!["acme/widget"]), ("second/", vec!["acme/widget"])]),
            "acme/widget",
            &package_config(None),
            Path::new(DEFAULT),
        );
        assert_eq!(target, PathBuf::from("/project/second"));
    }
}
