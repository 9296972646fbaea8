use anyhow::{Result, bail};
use log::{debug, info};
use std::path::PathBuf;

use super::Installer;
use crate::package::Package;
use crate::runtime::Runtime;

/// Base installer for files that some other tool already extracted into
/// `<vendor>/<name>`. It only checks that they are there.
pub struct ExtractedInstaller<'a, R: Runtime> {
    runtime: &'a R,
    vendor_dir: PathBuf,
}

impl<'a, R: Runtime> ExtractedInstaller<'a, R> {
    pub fn new(runtime: &'a R, vendor_dir: PathBuf) -> Self {
        Self {
            runtime,
            vendor_dir,
        }
    }

    fn ensure_extracted(&self, package: &Package) -> Result<()> {
        let path = self.install_path(package);
        if !self.runtime.is_dir(&path) {
            bail!(
                "Package {} is not extracted: {:?} is not a directory",
                package.name,
                path
            );
        }
        debug!("Found extracted files for {} in {:?}", package.name, path);
        Ok(())
    }
}

impl<R: Runtime> Installer for ExtractedInstaller<'_, R> {
    fn supports(&self, _package_type: &str) -> bool {
        true
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.vendor_dir.join(&package.name)
    }

    fn install(&self, package: &Package) -> Result<()> {
        self.ensure_extracted(package)
    }

    fn update(&self, _initial: &Package, target: &Package) -> Result<()> {
        self.ensure_extracted(target)
    }

    #[tracing::instrument(skip(self, package), fields(package = %package.name))]
    fn uninstall(&self, package: &Package) -> Result<()> {
        let path = self.install_path(package);
        if !self.runtime.exists(&path) {
            debug!("Nothing to remove for {} at {:?}", package.name, path);
            return Ok(());
        }
        self.runtime.remove_dir_all(&path)?;
        info!("Removed {:?}", path);
        Ok(())
    }
}
