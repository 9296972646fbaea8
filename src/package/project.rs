use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::runtime::Runtime;

/// Project-wide settings read from the enclosing project's `extra` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectConfig {
    /// `installer-paths` entries in declaration order: (path, package names).
    pub installer_paths: Vec<(String, Vec<String>)>,
}

#[derive(Deserialize)]
struct ProjectManifest {
    #[serde(default)]
    extra: Map<String, Value>,
}

impl ProjectConfig {
    pub const INSTALLER_PATHS: &'static str = "installer-paths";

    pub fn from_extra(extra: &Map<String, Value>) -> Self {
        let mut installer_paths = Vec::new();

        match extra.get(Self::INSTALLER_PATHS) {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (path, names) in map {
                    let Some(names) = names.as_array() else {
                        warn!(
                            "Ignoring {} entry {:?}: expected a list of package names",
                            Self::INSTALLER_PATHS,
                            path
                        );
                        continue;
                    };
                    let names = names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect();
                    installer_paths.push((path.clone(), names));
                }
            }
            Some(other) => {
                warn!("Ignoring {}: expected an object, got {}", Self::INSTALLER_PATHS, other);
            }
        }

        Self { installer_paths }
    }

    /// The `installer-paths` entry claiming `package_name`.
    ///
    /// When several entries list the same name, the last one in declaration order wins.
    pub fn installer_path_for(&self, package_name: &str) -> Option<&str> {
        self.installer_paths
            .iter()
            .rev()
            .find(|(_, names)| names.iter().any(|n| n == package_name))
            .map(|(path, _)| path.as_str())
    }

    /// Load the project manifest. A missing file yields an empty configuration.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        if !runtime.exists(path) {
            debug!("No project manifest at {:?}, using empty configuration", path);
            return Ok(Self::default());
        }
        let content = runtime.read_to_string(path)?;
        let manifest: ProjectManifest = serde_json::from_str(&content)
            .with_context(|| format!("Invalid project manifest {:?}", path))?;
        Ok(Self::from_extra(&manifest.extra))
    }
}
