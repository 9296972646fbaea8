use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::{
    installer::Installer,
    package::{PACKAGE_TYPE, Package},
    runtime::Runtime,
};

pub mod config;
mod status;

pub use status::{status, status_lines};

use config::Config;

/// Run the install lifecycle for each package manifest, in order.
/// Stops at the first package that fails.
#[tracing::instrument(skip(config))]
pub fn install<R: Runtime>(config: Config<R>, manifests: &[PathBuf]) -> Result<()> {
    let markers = config.marker_store();
    let installer = config.installer(&markers)?;

    for manifest in manifests {
        let package = Package::load(&config.runtime, manifest)?;
        if installer.supports(&package.package_type) {
            installer
                .install(&package)
                .with_context(|| format!("Failed to install {}", package.name))?;
        } else {
            warn_unsupported(&package);
            installer.base().install(&package)?;
        }
        println!("Installed {}", package.name);
    }
    Ok(())
}

/// Run the update lifecycle from `initial` to `target`.
#[tracing::instrument(skip(config))]
pub fn update<R: Runtime>(config: Config<R>, initial: &Path, target: &Path) -> Result<()> {
    let markers = config.marker_store();
    let installer = config.installer(&markers)?;

    let initial = Package::load(&config.runtime, initial)?;
    let target = Package::load(&config.runtime, target)?;
    if initial.name != target.name {
        debug!("Update replaces {} with {}", initial.name, target.name);
    }

    if installer.supports(&target.package_type) {
        installer
            .update(&initial, &target)
            .with_context(|| format!("Failed to update {}", target.name))?;
    } else {
        warn_unsupported(&target);
        installer.base().update(&initial, &target)?;
    }
    println!("Updated {}", target.name);
    Ok(())
}

/// Uninstall a package. Relocated files and the relocation marker are not touched
/// by the relocation layer.
#[tracing::instrument(skip(config))]
pub fn uninstall<R: Runtime>(config: Config<R>, manifest: &Path) -> Result<()> {
    let markers = config.marker_store();
    let installer = config.installer(&markers)?;

    let package = Package::load(&config.runtime, manifest)?;
    if installer.supports(&package.package_type) {
        installer.uninstall(&package)?;
    } else {
        warn_unsupported(&package);
        installer.base().uninstall(&package)?;
    }
    println!("Uninstalled {}", package.name);
    Ok(())
}

fn warn_unsupported(package: &Package) {
    warn!(
        "{} has type {:?}, not {:?}; skipping relocation",
        package.name, package.package_type, PACKAGE_TYPE
    );
}
