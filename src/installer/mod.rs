//! Installer lifecycle.
//!
//! The host drives packages through an [`Installer`]. The non-destructive
//! installer wraps any base installer: the base places the files, then the
//! relocation engine moves them to their configured destination.

mod extracted;

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::marker::MarkerStore;
use crate::package::{PACKAGE_TYPE, Package, ProjectConfig};
use crate::relocate::{Relocation, Relocator};
use crate::runtime::Runtime;

pub use extracted::ExtractedInstaller;

#[cfg_attr(test, mockall::automock)]
pub trait Installer {
    /// Whether this installer handles packages declaring `package_type`.
    fn supports(&self, package_type: &str) -> bool;

    /// Directory the package's files are extracted into.
    fn install_path(&self, package: &Package) -> PathBuf;

    fn install(&self, package: &Package) -> Result<()>;

    fn update(&self, initial: &Package, target: &Package) -> Result<()>;

    fn uninstall(&self, package: &Package) -> Result<()>;
}

pub struct NonDestructiveArchiveInstaller<'a, R: Runtime, M: MarkerStore, B: Installer> {
    base: B,
    relocator: Relocator<'a, R, M>,
    project: ProjectConfig,
}

impl<'a, R: Runtime, M: MarkerStore, B: Installer> NonDestructiveArchiveInstaller<'a, R, M, B> {
    pub fn new(base: B, relocator: Relocator<'a, R, M>, project: ProjectConfig) -> Self {
        Self {
            base,
            relocator,
            project,
        }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    fn relocate(&self, package: &Package) -> Result<Relocation> {
        let default_dir = self.base.install_path(package);
        let relocation = self
            .relocator
            .relocate(package, &self.project, &default_dir)?;
        debug!("Relocation of {}: {:?}", package.name, relocation);
        Ok(relocation)
    }
}

impl<R: Runtime, M: MarkerStore, B: Installer> Installer for NonDestructiveArchiveInstaller<'_, R, M, B> {
    fn supports(&self, package_type: &str) -> bool {
        package_type == PACKAGE_TYPE
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.base.install_path(package)
    }

    #[tracing::instrument(skip(self, package), fields(package = %package.name))]
    fn install(&self, package: &Package) -> Result<()> {
        self.base.install(package)?;
        self.relocate(package)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, initial, target), fields(package = %target.name))]
    fn update(&self, initial: &Package, target: &Package) -> Result<()> {
        self.base.update(initial, target)?;
        self.relocate(target)?;
        Ok(())
    }

    /// Relocated files and the marker are left where they are.
    fn uninstall(&self, package: &Package) -> Result<()> {
        self.base.uninstall(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MockMarkerStore;
    use crate::runtime::MockRuntime;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use serde_json::json;

    const URL: &str = "https://example.com/widget-1.0.zip";

    fn widget() -> Package {
        Package::new("acme/widget", PACKAGE_TYPE).with_dist_url(URL)
    }

    fn base_with_install_path() -> MockInstaller {
        let mut base = MockInstaller::new();
        base.expect_install_path()
            .returning(|p| PathBuf::from("/project/vendor").join(&p.name));
        base
    }

    #[test]
    fn test_supports_only_own_type() {
        let runtime = MockRuntime::new();
        let markers = MockMarkerStore::new();
        let mut base = MockInstaller::new();
        base.expect_supports().never();

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        assert!(installer.supports("non-destructive-archive-installer"));
        assert!(!installer.supports("library"));
        assert!(!installer.supports(""));
    }

    #[test]
    fn test_install_delegates_then_relocates() {
        let runtime = MockRuntime::new();
        let mut seq = Sequence::new();
        let mut base = base_with_install_path();
        base.expect_install()
            .withf(|p| p.name == "acme/widget")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut markers = MockMarkerStore::new();
        // Already relocated from the same URL: the engine stops after reading the marker
        markers
            .expect_read_last_url()
            .with(eq("acme/widget"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(URL.to_string())));

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        installer.install(&widget()).unwrap();
    }

    #[test]
    fn test_install_base_failure_skips_relocation() {
        let runtime = MockRuntime::new();
        let mut base = base_with_install_path();
        base.expect_install()
            .returning(|_| Err(anyhow::anyhow!("extraction failed")));
        let mut markers = MockMarkerStore::new();
        markers.expect_read_last_url().never();

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        let err = installer.install(&widget()).unwrap_err();
        assert!(err.to_string().contains("extraction failed"));
    }

    #[test]
    fn test_update_relocates_target_package() {
        let runtime = MockRuntime::new();
        let mut base = base_with_install_path();
        base.expect_update()
            .withf(|initial, target| initial.dist_url() == Some("old") && target.dist_url() == Some(URL))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut markers = MockMarkerStore::new();
        markers
            .expect_read_last_url()
            .times(1)
            .returning(|_| Ok(Some(URL.to_string())));

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        let initial = Package::new("acme/widget", PACKAGE_TYPE).with_dist_url("old");
        installer.update(&initial, &widget()).unwrap();
    }

    #[test]
    fn test_relocation_error_surfaces_as_anyhow() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/project/web")))
            .returning(|_| true);
        runtime
            .expect_is_dir()
            .with(eq(PathBuf::from("/project/web")))
            .returning(|_| false);

        let mut base = base_with_install_path();
        base.expect_install().returning(|_| Ok(()));
        let mut markers = MockMarkerStore::new();
        markers.expect_read_last_url().returning(|_| Ok(None));
        markers.expect_write_last_url().never();

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        let err = installer
            .install(&widget().with_extra("target-dir", json!("web")))
            .unwrap_err();
        let relocate_err = err.downcast_ref::<crate::relocate::RelocateError>().unwrap();
        assert!(relocate_err.is_config_error());
    }

    #[test]
    fn test_uninstall_is_pass_through() {
        // Any runtime or marker access would panic
        let runtime = MockRuntime::new();
        let markers = MockMarkerStore::new();
        let mut base = MockInstaller::new();
        base.expect_uninstall()
            .withf(|p| p.name == "acme/widget")
            .times(1)
            .returning(|_| Ok(()));

        let installer = NonDestructiveArchiveInstaller::new(
            base,
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        installer.uninstall(&widget()).unwrap();
    }

    #[test]
    fn test_install_path_comes_from_base() {
        let runtime = MockRuntime::new();
        let markers = MockMarkerStore::new();
        let installer = NonDestructiveArchiveInstaller::new(
            base_with_install_path(),
            Relocator::new(&runtime, &markers, PathBuf::from("/project")),
            ProjectConfig::default(),
        );

        assert_eq!(
            installer.install_path(&widget()),
            PathBuf::from("/project/vendor/acme/widget")
        );
    }
}
