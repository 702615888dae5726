//! Wave Resonance Index
//!
//! Indexes documents by a deterministic wave transform of their embedding
//! vectors and retrieves them by "resonance", a similarity over aligned wave
//! components that can be modulated per query by an emotional state and a
//! harmonic preference.
//!
//! # Architecture
//!
//! - **wave**: vector-to-wave transform and intra-vector harmonic tags
//! - **scoring**: the resonance scorer, ingestion and query variants
//! - **graph**: per-category top-K resonance graph
//! - **search**: query ranking with valence, importance and graph re-ranking
//! - **harmonics**: document-to-document interval relationships
//! - **snapshot**: immutable index snapshots behind a swappable handle
//! - **ingest**: source records and files to documents
//! - **artifacts**: serializable category and master indices
//! - **traits**: extraction, embedding and storage collaborators
//! - **config** / **error**: TOML configuration and `ResonanceError`
//!
//! # Example
//!
//! ```
//! use wave_resonance_core::{
//!     Category, Document, IndexSnapshot, ResonanceGraphBuilder, SearchContext, SearchEngine,
//! };
//! use wave_resonance_core::wave::vector_to_wave;
//!
//! let docs = vec![
//!     Document::new("a", Category::Physics, Some(vector_to_wave(&[0.5, 0.5]))),
//!     Document::new("b", Category::Physics, Some(vector_to_wave(&[0.4, 0.5]))),
//! ];
//! let snapshot = IndexSnapshot::build(docs, &ResonanceGraphBuilder::default()).unwrap();
//!
//! let query = vector_to_wave(&[0.5, 0.5]);
//! let hits = snapshot.search(&SearchEngine::default(), &query, &SearchContext::default(), None, 5);
//! assert_eq!(hits[0].document.id.as_str(), "a");
//! ```

pub mod artifacts;
pub mod config;
pub mod error;
pub mod graph;
pub mod harmonics;
pub mod ingest;
pub mod scoring;
pub mod search;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod wave;

// Re-exports for convenience
pub use artifacts::{CategoryIndex, DocumentSummary, MasterIndex};
pub use config::ResonanceConfig;
pub use error::{ResonanceError, ResonanceResult};
pub use graph::{GraphStats, ResonanceGraph, ResonanceGraphBuilder, ResonanceLink};
pub use harmonics::{HarmonicMatch, HarmonicType, HarmonicsFinder, Relationship};
pub use ingest::{Ingestor, SourceRecord};
pub use scoring::resonance;
pub use search::{SearchEngine, SearchHit};
pub use snapshot::{IndexSnapshot, IndexStats, SnapshotHandle};
pub use traits::{DocumentStore, EmbeddingProvider, TextExtractor};
pub use types::{
    Category, DocType, Document, DocumentId, DocumentMetadata, EmotionalState, HarmonicPreference,
    SearchContext,
};
pub use wave::{vector_to_wave, WavePattern};
