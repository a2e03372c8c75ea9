//! Storage-specific error type wrapping IO and JSON errors.

use std::path::PathBuf;

use vcontrol_domain::error::VControlError;

/// Errors originating from the JSON catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing or renaming the file failed.
    #[error("io error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded or decoded.
    #[error("invalid catalogue document")]
    Json(#[from] serde_json::Error),

    /// The document was written by an incompatible schema version.
    #[error("unsupported catalogue version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for VControlError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
