//! Package and project model.
//!
//! The host package manager owns these records; this crate only reads them.
//! Manifests are a composer-compatible subset parsed with `serde_json`
//! (built with `preserve_order`, so `extra` maps keep declaration order).

mod config;
mod manifest;
mod project;

pub use config::PackageConfig;
pub use manifest::{Dist, Package};
pub use project::ProjectConfig;

/// The package type this installer handles. Every other type bypasses relocation.
pub const PACKAGE_TYPE: &str = "non-destructive-archive-installer";
