use std::path::PathBuf;
use thiserror::Error;

/// Why a relocation was aborted.
///
/// Entries moved before the failure stay moved and the marker is left untouched,
/// so the next install/update retries whatever remains.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Target directory {path:?} for {package} exists but is not a directory")]
    TargetNotDirectory { package: String, path: PathBuf },

    #[error("Cannot create target directory {path:?} for {package}: {reason}")]
    TargetCreate {
        package: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Target directory {target:?} for {package} lies inside its extraction directory {extracted:?}")]
    TargetInsideSource {
        package: String,
        target: PathBuf,
        extracted: PathBuf,
    },

    #[error("Cannot list extraction directory {path:?} for {package}: {reason}")]
    ReadSource {
        package: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to move {from:?} to {to:?} for {package}: {reason}")]
    Move {
        package: String,
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Marker error for {package}: {reason}")]
    Marker { package: String, reason: String },
}

impl RelocateError {
    /// True for errors caused by where the package was configured to go.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RelocateError::TargetNotDirectory { .. }
                | RelocateError::TargetCreate { .. }
                | RelocateError::TargetInsideSource { .. }
        )
    }

    pub fn package(&self) -> &str {
        match self {
            RelocateError::TargetNotDirectory { package, .. }
            | RelocateError::TargetCreate { package, .. }
            | RelocateError::TargetInsideSource { package, .. }
            | RelocateError::ReadSource { package, .. }
            | RelocateError::Move { package, .. }
            | RelocateError::Marker { package, .. } => package,
        }
    }

    pub(crate) fn marker(package: &str, err: anyhow::Error) -> Self {
        RelocateError::Marker {
            package: package.to_string(),
            reason: format!("{:#}", err),
        }
    }
}
