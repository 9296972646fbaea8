//! Per-package record of the last relocated distribution URL.
//!
//! Layout: `<root>/<package name>/download-status.txt`, holding the URL verbatim.
//! The record is keyed by package name, not version, and is never deleted.

use anyhow::{Context, Result, bail};
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::runtime::Runtime;

pub const MARKER_FILE_NAME: &str = "download-status.txt";

/// Keyed store mapping a package name to the URL last relocated for it.
#[cfg_attr(test, mockall::automock)]
pub trait MarkerStore {
    /// Where the marker for `package_name` lives.
    fn marker_path(&self, package_name: &str) -> Result<PathBuf>;

    /// The last relocated URL, or `None` if the package was never relocated.
    fn read_last_url(&self, package_name: &str) -> Result<Option<String>>;

    /// Record `url` as the last relocated URL, replacing any previous value.
    fn write_last_url(&self, package_name: &str, url: &str) -> Result<()>;
}

/// Marker store backed by one plain-text file per package.
pub struct FileMarkerStore<'a, R: Runtime> {
    runtime: &'a R,
    root: PathBuf,
}

impl<'a, R: Runtime> FileMarkerStore<'a, R> {
    pub fn new(runtime: &'a R, root: PathBuf) -> Self {
        Self { runtime, root }
    }
}

impl<R: Runtime> MarkerStore for FileMarkerStore<'_, R> {
    fn marker_path(&self, package_name: &str) -> Result<PathBuf> {
        validate_package_name(package_name)?;
        Ok(self.root.join(package_name).join(MARKER_FILE_NAME))
    }

    #[tracing::instrument(skip(self))]
    fn read_last_url(&self, package_name: &str) -> Result<Option<String>> {
        let path = self.marker_path(package_name)?;
        let Some(bytes) = self
            .runtime
            .read_if_exists(&path)
            .with_context(|| format!("Failed to read marker for {}", package_name))?
        else {
            debug!("No marker for {} at {:?}", package_name, path);
            return Ok(None);
        };
        // A write cut short may end mid-character; it must still compare unequal, not fail
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    #[tracing::instrument(skip(self))]
    fn write_last_url(&self, package_name: &str, url: &str) -> Result<()> {
        let path = self.marker_path(package_name)?;
        if let Some(parent) = path.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent)?;
        }
        // Not atomic: a truncated marker only triggers one extra relocation
        self.runtime
            .write(&path, url.as_bytes())
            .with_context(|| format!("Failed to write marker for {}", package_name))
    }
}

/// Package names become path segments, so they must stay inside the marker root.
fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Package name is empty");
    }
    let path = Path::new(name);
    if path.is_absolute() || path.has_root() {
        bail!("Package name {:?} must not be an absolute path", name);
    }
    for component in path.components() {
        if !matches!(component, Component::Normal(_)) {
            bail!("Package name {:?} contains an invalid path segment", name);
        }
    }
    // Components() silently drops "." and empty segments ("a//b", "a/./b")
    if name.split('/').any(|segment| segment.is_empty() || segment == ".") {
        bail!("Package name {:?} contains an invalid path segment", name);
    }
    Ok(())
}
