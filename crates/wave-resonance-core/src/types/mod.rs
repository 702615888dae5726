//! Domain types: documents and query context.

mod context;
mod document;

pub use context::{EmotionalState, HarmonicPreference, SearchContext};
pub use document::{Category, DocType, Document, DocumentId, DocumentMetadata};

/// An embedding vector as produced by the external embedding provider.
pub type EmbeddingVector = Vec<f32>;
