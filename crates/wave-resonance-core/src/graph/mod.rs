//! Resonance graph: per-document top-K neighbor lists.
//!
//! Built once per ingestion batch by [`ResonanceGraphBuilder`] and read-only
//! afterwards. Links never cross categories.

mod builder;

pub use builder::ResonanceGraphBuilder;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DocumentId;

/// A directed link to a resonant neighbor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceLink {
    pub id: DocumentId,
    pub score: f32,
}

impl ResonanceLink {
    pub fn new(id: impl Into<DocumentId>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Mapping from document ID to its neighbors, descending by score.
///
/// Documents without any qualifying link have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResonanceGraph {
    links: BTreeMap<DocumentId, Vec<ResonanceLink>>,
}

/// Summary statistics over a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub link_count: usize,
    pub max_degree: usize,
    pub mean_degree: f32,
    /// Node with the most links; the smallest ID wins ties.
    pub most_connected: Option<DocumentId>,
}

impl ResonanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighbor list of `id`. Empty lists are not stored.
    pub fn insert(&mut self, id: DocumentId, links: Vec<ResonanceLink>) {
        if links.is_empty() {
            self.links.remove(&id);
        } else {
            self.links.insert(id, links);
        }
    }

    /// Neighbors of `id`, strongest first. Empty for unknown IDs.
    pub fn neighbors(&self, id: &str) -> &[ResonanceLink] {
        self.links.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Link score from `from` to `to`, if `to` is among `from`'s neighbors.
    pub fn link_score(&self, from: &str, to: &str) -> Option<f32> {
        self.neighbors(from)
            .iter()
            .find(|link| link.id.as_str() == to)
            .map(|link| link.score)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.links.contains_key(id)
    }

    /// Number of documents with at least one link.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &[ResonanceLink])> {
        self.links.iter().map(|(id, links)| (id, links.as_slice()))
    }

    /// Entries whose source ID satisfies `keep`.
    pub fn subgraph<F>(&self, mut keep: F) -> ResonanceGraph
    where
        F: FnMut(&DocumentId) -> bool,
    {
        ResonanceGraph {
            links: self
                .links
                .iter()
                .filter(|(id, _)| keep(id))
                .map(|(id, links)| (id.clone(), links.clone()))
                .collect(),
        }
    }

    /// Absorb all entries of `other`; its lists replace existing ones.
    pub fn merge(&mut self, other: ResonanceGraph) {
        self.links.extend(other.links);
    }

    pub fn stats(&self) -> GraphStats {
        let node_count = self.links.len();
        let link_count = self.link_count();

        let mut most_connected: Option<(&DocumentId, usize)> = None;
        for (id, links) in &self.links {
            if most_connected.map_or(true, |(_, best)| links.len() > best) {
                most_connected = Some((id, links.len()));
            }
        }

        GraphStats {
            node_count,
            link_count,
            max_degree: most_connected.map_or(0, |(_, degree)| degree),
            mean_degree: if node_count == 0 {
                0.0
            } else {
                link_count as f32 / node_count as f32
            },
            most_connected: most_connected.map(|(id, _)| id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> ResonanceGraph {
        let mut graph = ResonanceGraph::new();
        graph.insert(
            DocumentId::new("a"),
            vec![ResonanceLink::new("b", 0.9), ResonanceLink::new("c", 0.6)],
        );
        graph.insert(DocumentId::new("b"), vec![ResonanceLink::new("a", 0.9)]);
        graph.insert(
            DocumentId::new("c"),
            vec![ResonanceLink::new("a", 0.6), ResonanceLink::new("b", 0.55)],
        );
        graph
    }

    #[test]
    fn test_neighbors_and_link_score() {
        let graph = sample_graph();
        assert_eq!(graph.neighbors("a").len(), 2);
        assert!(graph.neighbors("zzz").is_empty());
        assert_eq!(graph.link_score("a", "c"), Some(0.6));
        assert_eq!(graph.link_score("b", "c"), None);
    }

    #[test]
    fn test_empty_links_not_stored() {
        let mut graph = sample_graph();
        graph.insert(DocumentId::new("d"), Vec::new());
        assert!(!graph.contains("d"));
        graph.insert(DocumentId::new("b"), Vec::new());
        assert!(!graph.contains("b"));
    }

    #[test]
    fn test_stats() {
        let stats = sample_graph().stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.link_count, 5);
        assert_eq!(stats.max_degree, 2);
        assert!((stats.mean_degree - 5.0 / 3.0).abs() < 1e-6);
        // "a" and "c" both have two links; the smaller ID wins
        assert_eq!(stats.most_connected, Some(DocumentId::new("a")));
    }

    #[test]
    fn test_empty_graph_stats() {
        let stats = ResonanceGraph::new().stats();
        assert_eq!(stats, GraphStats::default());
    }

    #[test]
    fn test_subgraph_and_merge() {
        let graph = sample_graph();
        let only_a = graph.subgraph(|id| id.as_str() == "a");
        assert_eq!(only_a.len(), 1);

        let mut rebuilt = only_a;
        rebuilt.merge(graph.subgraph(|id| id.as_str() != "a"));
        assert_eq!(rebuilt, graph);
    }

    #[test]
    fn test_serializes_as_map() {
        let json = serde_json::to_value(sample_graph()).expect("serialize");
        assert_eq!(json["b"][0]["id"], "a");
        let restored: ResonanceGraph = serde_json::from_value(json).expect("deserialize");
        assert_eq!(restored, sample_graph());
    }
}
