use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    installer::{ExtractedInstaller, NonDestructiveArchiveInstaller},
    marker::FileMarkerStore,
    package::ProjectConfig,
    relocate::Relocator,
    runtime::{Runtime, path::normalize_path},
};

/// Installer stack used by the binary: relocation on top of pre-extracted files.
pub type HostInstaller<'a, R> =
    NonDestructiveArchiveInstaller<'a, R, FileMarkerStore<'a, R>, ExtractedInstaller<'a, R>>;

pub const PROJECT_FILE_NAME: &str = "composer.json";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub project_root: PathBuf,
    /// Default install root (`<vendor>/<name>`) and marker root.
    pub vendor_dir: PathBuf,
    pub project_file: PathBuf,
}

impl<R: Runtime> Config<R> {
    /// Resolve the command line paths to absolute ones.
    ///
    /// `project_root` and `project_file` are relative to the current directory,
    /// `vendor_dir` is relative to the project root.
    pub fn new(
        runtime: R,
        project_root: Option<PathBuf>,
        vendor_dir: PathBuf,
        project_file: Option<PathBuf>,
    ) -> Result<Self> {
        let cwd = runtime.current_dir()?;
        let project_root = match project_root {
            Some(path) => absolute(&cwd, &path),
            None => normalize_path(&cwd),
        };
        let vendor_dir = absolute(&project_root, &vendor_dir);
        let project_file = match project_file {
            Some(path) => absolute(&cwd, &path),
            None => project_root.join(PROJECT_FILE_NAME),
        };
        debug!(
            "Project root {:?}, vendor dir {:?}, project file {:?}",
            project_root, vendor_dir, project_file
        );

        Ok(Self {
            runtime,
            project_root,
            vendor_dir,
            project_file,
        })
    }

    pub fn marker_store(&self) -> FileMarkerStore<'_, R> {
        FileMarkerStore::new(&self.runtime, self.vendor_dir.clone())
    }

    /// Assemble the installer stack. Loads the project manifest.
    pub fn installer<'a>(&'a self, markers: &'a FileMarkerStore<'a, R>) -> Result<HostInstaller<'a, R>> {
        let project = ProjectConfig::load(&self.runtime, &self.project_file)?;
        let base = ExtractedInstaller::new(&self.runtime, self.vendor_dir.clone());
        let relocator = Relocator::new(&self.runtime, markers, self.project_root.clone());
        Ok(NonDestructiveArchiveInstaller::new(base, relocator, project))
    }
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    normalize_path(&base.join(path))
}
