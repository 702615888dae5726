//! Storage error types.

use thiserror::Error;
use wave_resonance_core::ResonanceError;

/// Errors of the JSON directory store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store directory could not be created or listed.
    #[error("Store directory '{path}' unavailable: {message}")]
    DirectoryUnavailable {
        /// Directory path
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Writing an artifact failed.
    #[error("Write failed for '{path}': {message}")]
    WriteFailed { path: String, message: String },

    /// Reading an artifact failed.
    #[error("Read failed for '{path}': {message}")]
    ReadFailed { path: String, message: String },

    /// An artifact could not be encoded or decoded.
    #[error("Serialization error in '{file}': {message}")]
    Serialization { file: String, message: String },

    /// Artifacts are individually readable but inconsistent with each other.
    #[error("Index corruption detected in {file}: {details}")]
    IndexCorrupted { file: String, details: String },
}

impl StorageError {
    /// Whether the stored data itself is damaged, as opposed to the store
    /// being temporarily unreachable.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StorageError::Serialization { .. } | StorageError::IndexCorrupted { .. }
        )
    }
}

impl From<StorageError> for ResonanceError {
    fn from(e: StorageError) -> Self {
        ResonanceError::Storage(e.to_string())
    }
}

/// Convenient Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_write_failed() {
        let error = StorageError::WriteFailed {
            path: "/data/documents.json".to_string(),
            message: "disk full".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("/data/documents.json"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_error_display_index_corrupted() {
        let error = StorageError::IndexCorrupted {
            file: "master_index.json".to_string(),
            details: "total_documents 3 but 2 documents stored".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("master_index.json"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_corruption_classification() {
        assert!(StorageError::Serialization {
            file: "a".into(),
            message: "eof".into()
        }
        .is_corruption());
        assert!(!StorageError::ReadFailed {
            path: "a".into(),
            message: "denied".into()
        }
        .is_corruption());
    }

    #[test]
    fn test_into_resonance_error() {
        let err: ResonanceError = StorageError::DirectoryUnavailable {
            path: "/nope".into(),
            message: "permission denied".into(),
        }
        .into();
        assert!(matches!(err, ResonanceError::Storage(ref m) if m.contains("/nope")));
    }
}
