//! Relocation engine.
//!
//! Moves the contents of a package's default extraction directory into its
//! effective target directory, once per distinct distribution URL.

mod error;
mod target;

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::marker::MarkerStore;
use crate::package::{Package, PackageConfig, ProjectConfig};
use crate::runtime::path::normalize_path;
use crate::runtime::{Runtime, is_path_under};

pub use error::RelocateError;
pub use target::resolve_target_dir;

/// What a relocation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// The package has no distribution URL; nothing was read or written.
    NoDistUrl,
    /// The marker already holds the current URL; nothing was moved.
    UpToDate { target: PathBuf },
    /// `moved` entries were placed into `target` and the marker was updated.
    Relocated { target: PathBuf, moved: usize },
}

pub struct Relocator<'a, R: Runtime, M: MarkerStore> {
    runtime: &'a R,
    markers: &'a M,
    project_root: PathBuf,
}

impl<'a, R: Runtime, M: MarkerStore> Relocator<'a, R, M> {
    pub fn new(runtime: &'a R, markers: &'a M, project_root: PathBuf) -> Self {
        Self {
            runtime,
            markers,
            project_root,
        }
    }

    /// Relocate `package` out of `default_dir` if its distribution URL changed
    /// since the last successful relocation.
    #[tracing::instrument(skip(self, package, project), fields(package = %package.name))]
    pub fn relocate(
        &self,
        package: &Package,
        project: &ProjectConfig,
        default_dir: &Path,
    ) -> Result<Relocation, RelocateError> {
        let name = package.name.as_str();

        let Some(url) = package.dist_url() else {
            debug!("{} has no distribution URL, nothing to relocate", name);
            return Ok(Relocation::NoDistUrl);
        };

        let config = PackageConfig::from_extra(&package.extra);
        if config.omit_first_directory {
            debug!(
                "{} sets {}; entries are moved as-is",
                name,
                PackageConfig::OMIT_FIRST_DIRECTORY
            );
        }

        let target = resolve_target_dir(&self.project_root, project, name, &config, default_dir);
        debug!("Effective target directory for {}: {:?}", name, target);

        let last_url = self
            .markers
            .read_last_url(name)
            .map_err(|e| RelocateError::marker(name, e))?;
        if last_url.as_deref() == Some(url) {
            debug!("{} already relocated from {}", name, url);
            return Ok(Relocation::UpToDate { target });
        }

        let moved = if normalize_path(&target) == normalize_path(default_dir) {
            debug!("{} targets its extraction directory, no move needed", name);
            0
        } else {
            self.move_entries(name, default_dir, &target)?
        };

        self.markers
            .write_last_url(name, url)
            .map_err(|e| RelocateError::marker(name, e))?;

        info!("Relocated {} entries of {} into {:?}", moved, name, target);
        Ok(Relocation::Relocated { target, moved })
    }

    /// Move every direct entry of `source` into `target`, except the package's marker.
    /// Stops at the first failure; nothing is rolled back.
    fn move_entries(&self, name: &str, source: &Path, target: &Path) -> Result<usize, RelocateError> {
        if is_path_under(target, source) {
            return Err(RelocateError::TargetInsideSource {
                package: name.to_string(),
                target: target.to_path_buf(),
                extracted: source.to_path_buf(),
            });
        }

        self.ensure_target_dir(name, target)?;

        let marker_path = self
            .markers
            .marker_path(name)
            .map_err(|e| RelocateError::marker(name, e))?;
        let marker_path = normalize_path(&marker_path);

        let entries = self
            .runtime
            .read_dir(source)
            .map_err(|e| RelocateError::ReadSource {
                package: name.to_string(),
                path: source.to_path_buf(),
                reason: format!("{:#}", e),
            })?;

        let mut moved = 0;
        for entry in entries {
            if normalize_path(&entry) == marker_path {
                debug!("Leaving marker {:?} in place", entry);
                continue;
            }
            let Some(file_name) = entry.file_name() else {
                continue;
            };
            let dest = target.join(file_name);
            if is_path_under(source, &dest) {
                return Err(RelocateError::Move {
                    package: name.to_string(),
                    from: entry,
                    to: dest,
                    reason: "destination would replace the extraction directory".to_string(),
                });
            }

            self.move_entry(&entry, &dest)
                .map_err(|e| RelocateError::Move {
                    package: name.to_string(),
                    from: entry.clone(),
                    to: dest.clone(),
                    reason: format!("{:#}", e),
                })?;
            debug!("Moved {:?} -> {:?}", entry, dest);
            moved += 1;
        }

        Ok(moved)
    }

    /// Rename `from` to `dest`, silently replacing whatever `dest` holds.
    fn move_entry(&self, from: &Path, dest: &Path) -> anyhow::Result<()> {
        if self.runtime.is_symlink(dest) {
            self.runtime.remove_file(dest)?;
        } else if self.runtime.is_dir(dest) {
            self.runtime.remove_dir_all(dest)?;
        } else if self.runtime.exists(dest) {
            self.runtime.remove_file(dest)?;
        }
        self.runtime.rename(from, dest)
    }

    fn ensure_target_dir(&self, name: &str, target: &Path) -> Result<(), RelocateError> {
        if self.runtime.exists(target) {
            if !self.runtime.is_dir(target) {
                return Err(RelocateError::TargetNotDirectory {
                    package: name.to_string(),
                    path: target.to_path_buf(),
                });
            }
            return Ok(());
        }
        self.runtime
            .create_dir_all(target)
            .map_err(|e| RelocateError::TargetCreate {
                package: name.to_string(),
                path: target.to_path_buf(),
                reason: format!("{:#}", e),
            })
    }
}
