//! Immutable index snapshots and the handle that swaps them.
//!
//! An [`IndexSnapshot`] bundles documents, the resonance graph and the master
//! index. It is never mutated after construction: ingestion builds a new one
//! and installs it through [`SnapshotHandle::replace`], so concurrent readers
//! always see either the old or the new index in full.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::artifacts::{CategoryIndex, MasterIndex};
use crate::error::{ResonanceError, ResonanceResult};
use crate::graph::{GraphStats, ResonanceGraph, ResonanceGraphBuilder, ResonanceLink};
use crate::harmonics::{HarmonicMatch, HarmonicType, HarmonicsFinder};
use crate::search::{SearchEngine, SearchHit};
use crate::types::{Category, Document, DocumentId, SearchContext};
use crate::wave::WavePattern;

/// Number of links shown for the most connected document.
const TOP_LINKS_SHOWN: usize = 3;

/// Owned, read-only view of one ingested corpus.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    documents: Vec<Document>,
    by_id: HashMap<DocumentId, usize>,
    graph: ResonanceGraph,
    master: MasterIndex,
}

/// Aggregate statistics of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub documents_with_wave: usize,
    /// Documents per category, first-seen order.
    pub categories: Vec<(Category, usize)>,
    pub graph: GraphStats,
    pub most_connected: Option<ConnectedDocument>,
}

/// The document with the most resonance links and its strongest links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedDocument {
    pub id: DocumentId,
    pub title: String,
    pub degree: usize,
    pub top_links: Vec<ResonanceLink>,
}

impl Default for IndexSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            by_id: HashMap::new(),
            graph: ResonanceGraph::new(),
            master: MasterIndex::for_documents(&[]),
        }
    }

    /// Build a snapshot from a fresh batch, computing its graph.
    ///
    /// # Errors
    ///
    /// `ResonanceError::DuplicateDocument` if two documents share an ID.
    pub fn build(documents: Vec<Document>, builder: &ResonanceGraphBuilder) -> ResonanceResult<Self> {
        let by_id = index_by_id(&documents)?;
        let graph = builder.build(&documents);
        let master = MasterIndex::for_documents(&documents);
        Ok(Self {
            documents,
            by_id,
            graph,
            master,
        })
    }

    /// Reassemble a snapshot from persisted parts.
    ///
    /// # Errors
    ///
    /// `ResonanceError::DuplicateDocument` if two documents share an ID.
    pub fn from_parts(
        documents: Vec<Document>,
        graph: ResonanceGraph,
        master: MasterIndex,
    ) -> ResonanceResult<Self> {
        let by_id = index_by_id(&documents)?;
        Ok(Self {
            documents,
            by_id,
            graph,
            master,
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn graph(&self) -> &ResonanceGraph {
        &self.graph
    }

    pub fn master(&self) -> &MasterIndex {
        &self.master
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&i| &self.documents[i])
    }

    /// Like [`get`](Self::get), failing for unknown IDs.
    pub fn require(&self, id: &str) -> ResonanceResult<&Document> {
        self.get(id)
            .ok_or_else(|| ResonanceError::DocumentNotFound(id.to_string()))
    }

    /// Rank this snapshot's documents against `query`.
    pub fn search(
        &self,
        engine: &SearchEngine,
        query: &WavePattern,
        ctx: &SearchContext,
        category: Option<Category>,
        top_k: usize,
    ) -> Vec<SearchHit<'_>> {
        engine.search(query, ctx, &self.documents, category, &self.graph, top_k)
    }

    /// Search using a stored document's wave as the query.
    ///
    /// The document itself is excluded. Empty for unknown IDs or documents
    /// without a wave pattern.
    pub fn search_like(
        &self,
        engine: &SearchEngine,
        doc_id: &str,
        ctx: &SearchContext,
        category: Option<Category>,
        top_k: usize,
    ) -> Vec<SearchHit<'_>> {
        let Some(query) = self.get(doc_id).and_then(|d| d.wave.as_ref()) else {
            return Vec::new();
        };
        engine.search(
            query,
            ctx,
            self.documents.iter().filter(|d| d.id.as_str() != doc_id),
            category,
            &self.graph,
            top_k,
        )
    }

    pub fn find_harmonics(
        &self,
        finder: &HarmonicsFinder,
        doc_id: &str,
        harmonic_type: HarmonicType,
    ) -> Vec<HarmonicMatch<'_>> {
        finder.find(doc_id, harmonic_type, &self.documents)
    }

    /// Per-category artifacts of this snapshot.
    pub fn category_indices(&self) -> Vec<CategoryIndex> {
        CategoryIndex::collect(&self.documents, &self.graph)
    }

    /// Documents per category, first-seen order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for doc in &self.documents {
            match counts.iter_mut().find(|(c, _)| *c == doc.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((doc.category, 1)),
            }
        }
        counts
    }

    pub fn stats(&self) -> IndexStats {
        let graph = self.graph.stats();
        let most_connected = graph.most_connected.as_ref().map(|id| {
            let links = self.graph.neighbors(id.as_str());
            ConnectedDocument {
                id: id.clone(),
                title: self
                    .get(id.as_str())
                    .map(|d| d.title().to_string())
                    .unwrap_or_default(),
                degree: links.len(),
                top_links: links.iter().take(TOP_LINKS_SHOWN).cloned().collect(),
            }
        });

        IndexStats {
            total_documents: self.documents.len(),
            documents_with_wave: self.documents.iter().filter(|d| d.wave.is_some()).count(),
            categories: self.category_counts(),
            graph,
            most_connected,
        }
    }
}

fn index_by_id(documents: &[Document]) -> ResonanceResult<HashMap<DocumentId, usize>> {
    let mut by_id = HashMap::with_capacity(documents.len());
    for (i, doc) in documents.iter().enumerate() {
        if by_id.insert(doc.id.clone(), i).is_some() {
            return Err(ResonanceError::DuplicateDocument(doc.id.to_string()));
        }
    }
    Ok(by_id)
}

/// Shared owner of the current snapshot.
///
/// Readers take a cheap `Arc` clone under a short read lock and keep using it
/// for as long as they like; writers replace the whole snapshot at once.
#[derive(Debug, Default)]
pub struct SnapshotHandle {
    current: RwLock<Arc<IndexSnapshot>>,
}

impl SnapshotHandle {
    pub fn new(snapshot: IndexSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Install `snapshot`, returning the one it replaces.
    pub fn replace(&self, snapshot: IndexSnapshot) -> Arc<IndexSnapshot> {
        let next = Arc::new(snapshot);
        let documents = next.len();
        let links = next.graph().link_count();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(
            documents,
            links,
            previous_documents = previous.len(),
            "Index snapshot replaced"
        );
        previous
    }
}
