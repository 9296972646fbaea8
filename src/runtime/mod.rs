//! Runtime abstraction for system operations.
//!
//! Every component that touches the filesystem takes a `Runtime` so that the
//! relocation logic can be exercised against `MockRuntime` in unit tests and
//! against `RealRuntime` in integration tests.
//!
//! # Structure
//!
//! - `path` - Lexical path helpers (normalize, is_path_under, resolve_config_path)
//! - `env` - Process environment (current directory)
//! - `fs` - File system operations (read, write, rename, directories)

mod env;
mod fs;
pub mod path;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use path::{is_path_under, resolve_config_path};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Raw contents of `path`, or `None` if it does not exist.
    /// Any other failure (permissions, not a file) is an error.
    fn read_if_exists(&self, path: &Path) -> Result<Option<Vec<u8>>>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// True if `path` itself is a symlink (the link is not followed).
    fn is_symlink(&self, path: &Path) -> bool;

    /// List the direct children of a directory.
    /// The `.` and `..` pseudo-entries are never returned.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    // Environment
    fn current_dir(&self) -> Result<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn read_if_exists(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        self.read_if_exists_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.remove_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.is_symlink_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }
}
