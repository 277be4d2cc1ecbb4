//! JSON store errors.

use std::path::PathBuf;

use thiserror::Error;

use turnmark_protocols::StoreError;

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not a bookmark document.
    #[error("Failed to parse bookmark file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to create storage directory at {path}: {reason}")]
    CreateDirFailed { path: PathBuf, reason: String },

    /// No home directory to put the default file in.
    #[error("Storage path not set")]
    StoragePathNotSet,
}

impl From<JsonStoreError> for StoreError {
    fn from(err: JsonStoreError) -> Self {
        match err {
            JsonStoreError::Io(e) => StoreError::Io(e),
            JsonStoreError::Serialization(e) => StoreError::Serialization(e),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = JsonStoreError::Parse {
            path: PathBuf::from("/tmp/bookmarks.json"),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("/tmp/bookmarks.json"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_conversion_to_store_error() {
        let err: StoreError = JsonStoreError::StoragePathNotSet.into();
        assert!(matches!(err, StoreError::Unavailable(_)));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = JsonStoreError::Io(io).into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
