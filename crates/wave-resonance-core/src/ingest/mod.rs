//! Turning source material into documents.
//!
//! Two entry points:
//! - [`Ingestor::ingest_record`] for records that already carry their text and
//!   (optionally) their embedding
//! - [`Ingestor::ingest_file`] / [`Ingestor::ingest_files`], which call the
//!   extraction and embedding collaborators
//!
//! A source whose trimmed text is shorter than `min_content_chars` is skipped.
//! Extraction failures skip the file with a warning; embedding failures, and
//! embeddings whose length differs from the provider's `dimensions()`, keep
//! the document without a wave pattern, so it is listed but never scored.
//!
//! File ingestion also records the source's size and modification time.

pub mod heuristics;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::IngestConfig;
use crate::error::ResonanceResult;
use crate::traits::{EmbeddingProvider, TextExtractor};
use crate::types::{Document, DocumentMetadata, EmbeddingVector};
use crate::wave::vector_to_wave;

use heuristics::{
    categorize, doc_type_of, document_id, emotional_valence, extension_of, importance,
    title_from_path, truncate_chars,
};

/// A pre-extracted source, e.g. one line of a JSON-lines ingest file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Source path; hashed into the document ID and scanned for keywords.
    pub path: String,
    pub content: String,
    /// Embedding of the opening text. `None` leaves the document without a
    /// wave pattern.
    #[serde(default)]
    pub embedding: Option<EmbeddingVector>,
}

/// Builds [`Document`]s from sources.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Text handed to the embedding provider for `content`.
    pub fn embedding_input<'c>(&self, content: &'c str) -> &'c str {
        truncate_chars(content, self.config.embed_prefix_chars)
    }

    /// Build a document from a pre-extracted record.
    ///
    /// Returns `None` when the content is too short to index.
    pub fn ingest_record(&self, record: SourceRecord) -> Option<Document> {
        let path = Path::new(&record.path);
        self.assemble(&record.path, path, &record.path, &record.content, record.embedding)
    }

    /// Extract, embed and build one file.
    ///
    /// The ID is derived from `path` as given; the stored path is relative to
    /// `root` when `path` lies under it.
    ///
    /// # Errors
    ///
    /// Propagates the extractor's error. Embedding errors are logged and the
    /// document is kept without a wave pattern.
    pub fn ingest_file(
        &self,
        root: &Path,
        path: &Path,
        extractor: &dyn TextExtractor,
        embedder: &dyn EmbeddingProvider,
    ) -> ResonanceResult<Option<Document>> {
        let content = extractor.extract(path)?;
        if !self.long_enough(&content) {
            debug!(path = %path.display(), "Skipping short document");
            return Ok(None);
        }

        let embedding = match embedder.embed(self.embedding_input(&content)) {
            Ok(vector) if vector.len() == embedder.dimensions() => Some(vector),
            Ok(vector) => {
                warn!(
                    path = %path.display(),
                    expected = embedder.dimensions(),
                    actual = vector.len(),
                    "Embedding has unexpected length, indexing without wave"
                );
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Embedding failed, indexing without wave");
                None
            }
        };

        let source = path.to_string_lossy();
        let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
        let (file_size, modified) = file_facts(path);
        Ok(self
            .assemble(&source, path, &relative, &content, embedding)
            .map(|mut doc| {
                doc.metadata.file_size = file_size;
                doc.metadata.modified = modified;
                doc
            }))
    }

    /// Ingest many files, skipping the ones that fail with a warning.
    pub fn ingest_files<'p>(
        &self,
        root: &Path,
        paths: impl IntoIterator<Item = &'p Path>,
        extractor: &dyn TextExtractor,
        embedder: &dyn EmbeddingProvider,
    ) -> Vec<Document> {
        let mut documents = Vec::new();
        let mut skipped = 0usize;
        for path in paths {
            match self.ingest_file(root, path, extractor, embedder) {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => skipped += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping file");
                    skipped += 1;
                }
            }
        }
        info!(ingested = documents.len(), skipped, "File ingestion complete");
        documents
    }

    fn long_enough(&self, content: &str) -> bool {
        content.trim().chars().count() >= self.config.min_content_chars
    }

    fn assemble(
        &self,
        source: &str,
        path: &Path,
        stored_path: &str,
        content: &str,
        embedding: Option<EmbeddingVector>,
    ) -> Option<Document> {
        if !self.long_enough(content) {
            debug!(path = source, "Skipping short document");
            return None;
        }

        let category = categorize(source, content);
        let doc_type = doc_type_of(path);
        let valence = emotional_valence(content);

        let metadata = DocumentMetadata {
            title: title_from_path(path),
            path: stored_path.to_string(),
            content: truncate_chars(content, self.config.max_content_chars).to_string(),
            doc_type,
            ingested_at: Some(Utc::now()),
            extension: extension_of(path),
            file_size: None,
            modified: None,
        };

        let wave = embedding.map(|v| vector_to_wave(&v));
        Some(
            Document::new(document_id(source), category, wave)
                .with_valence(valence)
                .with_importance(importance(category, doc_type, valence))
                .with_metadata(metadata),
        )
    }
}

/// Size and modification time of `path`, when the file system reports them.
fn file_facts(path: &Path) -> (Option<u64>, Option<DateTime<Utc>>) {
    match std::fs::metadata(path) {
        Ok(meta) => (Some(meta.len()), meta.modified().ok().map(DateTime::<Utc>::from)),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No file metadata");
            (None, None)
        }
    }
}
