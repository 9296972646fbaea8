//! Non-destructive archive installer.
//!
//! Relocates the files of an extracted archive package from its default
//! extraction directory into a configured target directory, once per
//! distribution URL, leaving unrelated files in the target alone.

pub mod commands;
pub mod installer;
pub mod marker;
pub mod package;
pub mod relocate;
pub mod runtime;
