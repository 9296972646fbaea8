use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::runtime::Runtime;

/// A package as declared by the host.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Package {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub package_type: String,
    #[serde(default)]
    pub dist: Option<Dist>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

/// Distribution (archive) information.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Dist {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub dist_type: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, package_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_type: package_type.into(),
            ..Default::default()
        }
    }

    pub fn with_dist_url(mut self, url: impl Into<String>) -> Self {
        self.dist = Some(Dist {
            url: Some(url.into()),
            dist_type: None,
        });
        self
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// URL of the artifact currently resolved for this package.
    /// An empty URL counts as absent (e.g. metapackages).
    pub fn dist_url(&self) -> Option<&str> {
        self.dist
            .as_ref()
            .and_then(|d| d.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let package: Package = serde_json::from_str(&content)
            .with_context(|| format!("Invalid package manifest {:?}", path))?;
        if package.name.is_empty() {
            anyhow::bail!("Package manifest {:?} has no name", path);
        }
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_dist_url_absent_or_empty() {
        let pkg = Package::new("acme/meta", "metapackage");
        assert_eq!(pkg.dist_url(), None);

        let pkg = Package::new("acme/meta", "metapackage").with_dist_url("");
        assert_eq!(pkg.dist_url(), None);

        let pkg = Package::new("acme/widget", "x").with_dist_url("https://example.com/w.zip");
        assert_eq!(pkg.dist_url(), Some("https://example.com/w.zip"));
    }

    #[test]
    fn test_package_deserialize_composer_shape() {
        let json = r#"{
            "name": "acme/widget",
            "type": "non-destructive-archive-installer",
            "version": "1.2.0",
            "dist": {"url": "https://example.com/widget-1.2.0.zip", "type": "zip"},
            "extra": {"target-dir": "vendor/acme", "omit-first-directory": "true"}
        }"#;
        let pkg: Package = serde_json::from_str(json).unwrap();

        assert_eq!(pkg.name, "acme/widget");
        assert_eq!(pkg.package_type, "non-destructive-archive-installer");
        assert_eq!(pkg.dist_url(), Some("https://example.com/widget-1.2.0.zip"));
        assert_eq!(pkg.dist.unwrap().dist_type.as_deref(), Some("zip"));
        assert_eq!(pkg.extra.get("target-dir"), Some(&json!("vendor/acme")));
    }

    #[test]
    fn test_package_load_via_runtime() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/project/widget.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok(r#"{"name": "acme/widget", "type": "library"}"#.into()));

        let pkg = Package::load(&runtime, &path).unwrap();
        assert_eq!(pkg, Package::new("acme/widget", "library"));
    }

    #[test]
    fn test_package_load_rejects_missing_name() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(r#"{"type": "library"}"#.into()));

        let err = Package::load(&runtime, Path::new("/p.json")).unwrap_err();
        assert!(err.to_string().contains("has no name"));
    }

    #[test]
    fn test_package_load_reports_bad_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("{not json".into()));

        let err = Package::load(&runtime, Path::new("/p.json")).unwrap_err();
        assert!(err.to_string().contains("Invalid package manifest"));
    }
}
