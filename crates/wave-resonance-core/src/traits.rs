//! Collaborator interfaces.
//!
//! Text extraction and embedding are called synchronously during ingestion.
//! Persistence is async and whole-collection: a store saves a full snapshot
//! and loads one back, with no incremental updates.

use std::path::Path;

use async_trait::async_trait;

use crate::error::ResonanceResult;
use crate::snapshot::IndexSnapshot;
use crate::types::EmbeddingVector;

/// Pulls plain text out of a source file.
pub trait TextExtractor: Send + Sync {
    /// # Errors
    ///
    /// `ResonanceError::Extraction` when the file cannot be read or decoded.
    fn extract(&self, path: &Path) -> ResonanceResult<String>;
}

/// Turns text into an embedding vector.
///
/// All vectors from one provider must have the same length so that waves are
/// comparable index by index.
pub trait EmbeddingProvider: Send + Sync {
    /// # Errors
    ///
    /// `ResonanceError::Embedding` if generation fails.
    fn embed(&self, text: &str) -> ResonanceResult<EmbeddingVector>;

    /// Length of every produced vector.
    fn dimensions(&self) -> usize;
}

/// Durable storage for index snapshots.
///
/// # Example
///
/// ```rust,ignore
/// store.save(&snapshot).await?;
/// let restored = store.load().await?;
/// assert_eq!(restored.len(), snapshot.len());
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist `snapshot`, replacing whatever was stored before.
    async fn save(&self, snapshot: &IndexSnapshot) -> ResonanceResult<()>;

    /// Load the stored snapshot. An empty store yields an empty snapshot.
    async fn load(&self) -> ResonanceResult<IndexSnapshot>;
}
