use log::warn;
use serde_json::{Map, Value};

/// Package-level settings read from a package's `extra` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageConfig {
    /// `target-dir`: directory (relative to the project root) to relocate into.
    pub target_dir: Option<String>,
    /// `omit-first-directory`: parsed but not applied by the move step.
    pub omit_first_directory: bool,
}

impl PackageConfig {
    pub const TARGET_DIR: &'static str = "target-dir";
    pub const OMIT_FIRST_DIRECTORY: &'static str = "omit-first-directory";

    pub fn from_extra(extra: &Map<String, Value>) -> Self {
        let target_dir = match extra.get(Self::TARGET_DIR) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                warn!("Ignoring non-string {}: {}", Self::TARGET_DIR, other);
                None
            }
        };

        // Boolean-as-string: only a case-insensitive "true" enables it
        let omit_first_directory = match extra.get(Self::OMIT_FIRST_DIRECTORY) {
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            Some(Value::Bool(b)) => *b,
            _ => false,
        };

        Self {
            target_dir,
            omit_first_directory,
        }
    }
}
