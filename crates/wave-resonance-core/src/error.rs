//! Error types for wave resonance operations.
//!
//! The scoring, graph and search paths are infallible by construction: bad
//! input degrades to "no contribution" rather than an error. The variants here
//! cover configuration, context validation, and collaborator failures
//! (extraction, embedding, storage) surfaced during ingestion.

use thiserror::Error;

/// Result type alias for wave resonance operations.
pub type ResonanceResult<T> = Result<T, ResonanceError>;

/// Error type for all fallible wave resonance operations.
#[derive(Error, Debug)]
pub enum ResonanceError {
    // ========== Configuration Errors ==========
    /// Invalid configuration parameter.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Search context field out of its allowed range.
    #[error("Invalid search context: {field} = {value} ({reason})")]
    InvalidContext {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// A textual label did not name any known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    // ========== Document Errors ==========
    /// Document not found in the snapshot.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Two documents in one batch share an ID.
    #[error("Duplicate document ID: {0}")]
    DuplicateDocument(String),

    // ========== Collaborator Errors ==========
    /// Text extraction failed for a source file.
    #[error("Text extraction failed for '{path}': {message}")]
    Extraction { path: String, message: String },

    /// Embedding generation failed.
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Document store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    // ========== Serialization Errors ==========
    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ========== I/O Errors ==========
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ResonanceError {
    fn from(e: serde_json::Error) -> Self {
        ResonanceError::Serialization(e.to_string())
    }
}
