//! Serializable index artifacts.
//!
//! A persisted index consists of one [`CategoryIndex`] per category, the flat
//! document collection, and a [`MasterIndex`]. The document store decides
//! where they live; these types only fix their shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::wave::TRANSFORMER_VERSION;
use crate::graph::ResonanceGraph;
use crate::types::{Category, Document, DocumentId};

/// Display fields of one document inside a category index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
    pub path: String,
    pub importance: f32,
    pub emotional_valence: f32,
    /// `None` for documents without a wave pattern.
    pub wave_hash: Option<String>,
    /// Frequency of the strongest wave component.
    #[serde(default)]
    pub dominant_frequency: Option<f32>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.metadata.title.clone(),
            path: doc.metadata.path.clone(),
            importance: doc.importance,
            emotional_valence: doc.emotional_valence,
            wave_hash: doc.wave.as_ref().map(|w| w.wave_hash()),
            dominant_frequency: doc.wave.as_ref().and_then(|w| w.dominant_frequency()),
        }
    }
}

/// Per-category index: summaries plus the category's slice of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndex {
    pub category: Category,
    pub document_count: usize,
    pub documents: Vec<DocumentSummary>,
    pub resonance_graph: ResonanceGraph,
}

impl CategoryIndex {
    /// One index per category present in `documents`, first-seen order.
    pub fn collect(documents: &[Document], graph: &ResonanceGraph) -> Vec<CategoryIndex> {
        let mut indices: Vec<CategoryIndex> = Vec::new();
        for doc in documents {
            let position = match indices.iter().position(|ix| ix.category == doc.category) {
                Some(position) => position,
                None => {
                    indices.push(CategoryIndex {
                        category: doc.category,
                        document_count: 0,
                        documents: Vec::new(),
                        resonance_graph: ResonanceGraph::new(),
                    });
                    indices.len() - 1
                }
            };
            let index = &mut indices[position];
            index.document_count += 1;
            index.documents.push(DocumentSummary::from(doc));
        }

        for index in &mut indices {
            let members: Vec<&DocumentId> = index.documents.iter().map(|s| &s.id).collect();
            index.resonance_graph = graph.subgraph(|id| members.contains(&id));
        }
        indices
    }

    /// Artifact file name of this category's index.
    pub fn file_name(&self) -> String {
        Self::file_name_for(self.category)
    }

    pub fn file_name_for(category: Category) -> String {
        format!("{}_index.json", category.as_str())
    }
}

/// Top-level summary of a persisted index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterIndex {
    pub total_documents: usize,
    /// Categories present, first-seen order.
    pub categories: Vec<Category>,
    pub timestamp: DateTime<Utc>,
    pub wave_transformer_version: String,
    pub emotional_modulation_enabled: bool,
    pub graceland_mode_available: bool,
}

impl MasterIndex {
    pub const FILE_NAME: &'static str = "master_index.json";

    /// Master index for `documents`, stamped now.
    pub fn for_documents(documents: &[Document]) -> Self {
        Self::at(documents, Utc::now())
    }

    pub fn at(documents: &[Document], timestamp: DateTime<Utc>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        for doc in documents {
            if !categories.contains(&doc.category) {
                categories.push(doc.category);
            }
        }
        Self {
            total_documents: documents.len(),
            categories,
            timestamp,
            wave_transformer_version: TRANSFORMER_VERSION.to_string(),
            emotional_modulation_enabled: true,
            graceland_mode_available: true,
        }
    }
}

/// File name of the flat document collection.
pub const DOCUMENTS_FILE_NAME: &str = "documents.json";
