//! All-pairs resonance graph construction.

use rayon::prelude::*;
use tracing::{debug, info};

use super::{ResonanceGraph, ResonanceLink};
use crate::config::GraphConfig;
use crate::scoring::ingestion_resonance;
use crate::types::{Category, Document, DocumentId};
use crate::wave::WavePattern;

/// Builds a [`ResonanceGraph`] from a batch of documents.
///
/// Documents are grouped by category and only compared within their group.
/// Per document, links scoring strictly above `similarity_threshold` are kept,
/// strongest first, at most `max_neighbors` of them. Ties keep input order.
#[derive(Debug, Clone, Default)]
pub struct ResonanceGraphBuilder {
    config: GraphConfig,
}

impl ResonanceGraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the graph for a whole batch.
    pub fn build(&self, documents: &[Document]) -> ResonanceGraph {
        let mut graph = ResonanceGraph::new();
        for (category, members) in group_by_category(documents) {
            let partial = self.build_category(&members);
            debug!(
                category = %category,
                documents = members.len(),
                linked = partial.len(),
                "Built category resonance graph"
            );
            graph.merge(partial);
        }

        info!(
            documents = documents.len(),
            nodes = graph.len(),
            links = graph.link_count(),
            "Resonance graph built"
        );
        graph
    }

    /// Build the graph among one category's documents.
    ///
    /// The caller is responsible for passing documents of a single category.
    /// Documents without a wave pattern are skipped.
    pub fn build_category(&self, documents: &[&Document]) -> ResonanceGraph {
        let nodes: Vec<(&DocumentId, &WavePattern)> = documents
            .iter()
            .filter_map(|doc| doc.wave.as_ref().map(|wave| (&doc.id, wave)))
            .collect();

        let matrix = self.score_matrix(&nodes);

        let mut graph = ResonanceGraph::new();
        for (i, row) in matrix.iter().enumerate() {
            let mut links: Vec<ResonanceLink> = row
                .iter()
                .enumerate()
                .filter(|&(j, &score)| j != i && score > self.config.similarity_threshold)
                .map(|(j, &score)| ResonanceLink::new(nodes[j].0.clone(), score))
                .collect();

            // stable: equal scores keep input order
            links.sort_by(|a, b| b.score.total_cmp(&a.score));
            links.truncate(self.config.max_neighbors);
            graph.insert(nodes[i].0.clone(), links);
        }
        graph
    }

    /// Pairwise score matrix; row `i` holds `ingestion_resonance(i, j)`.
    ///
    /// Shared-tag bonuses use the first pattern's interval label, so the score
    /// is not symmetric in general and both directions are computed. The
    /// diagonal is unused and left 0.
    fn score_matrix(&self, nodes: &[(&DocumentId, &WavePattern)]) -> Vec<Vec<f32>> {
        let n = nodes.len();
        let row = |i: usize| -> Vec<f32> {
            (0..n)
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        ingestion_resonance(nodes[i].1, nodes[j].1)
                    }
                })
                .collect()
        };

        if self.config.parallel {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        }
    }
}

/// Group documents by category, categories in first-seen order.
fn group_by_category(documents: &[Document]) -> Vec<(Category, Vec<&Document>)> {
    let mut groups: Vec<(Category, Vec<&Document>)> = Vec::new();
    for doc in documents {
        match groups.iter_mut().find(|(category, _)| *category == doc.category) {
            Some((_, members)) => members.push(doc),
            None => groups.push((doc.category, vec![doc])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::vector_to_wave;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn doc(id: &str, category: Category, vector: &[f32]) -> Document {
        Document::new(id, category, Some(vector_to_wave(vector)))
    }

    fn random_docs(seed: u64, count: usize, dims: usize) -> Vec<Document> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                // mostly positive components so that many pairs clear the threshold
                let v: Vec<f32> = (0..dims).map(|_| rng.gen_range(-0.2..1.0)).collect();
                let category = if i % 3 == 0 {
                    Category::Physics
                } else {
                    Category::Epistemology
                };
                doc(&format!("doc-{:03}", i), category, &v)
            })
            .collect()
    }

    #[test]
    fn test_identical_documents_link() {
        let docs = vec![
            doc("a", Category::Physics, &[0.5, 0.5, 0.5]),
            doc("b", Category::Physics, &[0.5, 0.5, 0.5]),
        ];
        let graph = ResonanceGraphBuilder::default().build(&docs);
        assert_eq!(graph.neighbors("a"), &[ResonanceLink::new("b", 1.0)]);
        assert_eq!(graph.neighbors("b"), &[ResonanceLink::new("a", 1.0)]);
    }

    #[test]
    fn test_no_links_across_categories() {
        let docs = vec![
            doc("a", Category::Physics, &[0.5, 0.5, 0.5]),
            doc("b", Category::Rsvp, &[0.5, 0.5, 0.5]),
        ];
        let graph = ResonanceGraphBuilder::default().build(&docs);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_documents_without_wave_skipped() {
        let docs = vec![
            doc("a", Category::General, &[0.5, 0.5]),
            Document::new("ghost", Category::General, None),
            doc("b", Category::General, &[0.5, 0.5]),
        ];
        let graph = ResonanceGraphBuilder::default().build(&docs);
        assert!(!graph.contains("ghost"));
        assert!(graph
            .iter()
            .all(|(_, links)| links.iter().all(|l| l.id.as_str() != "ghost")));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_threshold_is_strict() {
        // opposite phases score -1; identical scores exactly 1.0
        let docs = vec![
            doc("a", Category::General, &[1.0]),
            doc("b", Category::General, &[-1.0]),
            doc("c", Category::General, &[1.0]),
        ];
        let config = GraphConfig {
            similarity_threshold: 1.0,
            ..Default::default()
        };
        let graph = ResonanceGraphBuilder::new(config).build(&docs);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_degree_bound_and_threshold() {
        let docs = random_docs(11, 40, 16);
        let config = GraphConfig {
            similarity_threshold: 0.3,
            max_neighbors: 4,
            parallel: true,
        };
        let graph = ResonanceGraphBuilder::new(config).build(&docs);
        assert!(!graph.is_empty());
        for (id, links) in graph.iter() {
            assert!(links.len() <= 4);
            assert!(links.iter().all(|l| l.score > 0.3));
            assert!(links.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(links.iter().all(|l| &l.id != id));
        }
    }

    #[test]
    fn test_links_stay_within_category() {
        let docs = random_docs(5, 30, 8);
        let graph = ResonanceGraphBuilder::new(GraphConfig {
            similarity_threshold: 0.0,
            ..Default::default()
        })
        .build(&docs);
        let category_of = |id: &str| {
            docs.iter()
                .find(|d| d.id.as_str() == id)
                .map(|d| d.category)
        };
        for (id, links) in graph.iter() {
            for link in links {
                assert_eq!(category_of(id.as_str()), category_of(link.id.as_str()));
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs = random_docs(99, 25, 12);
        let parallel = ResonanceGraphBuilder::new(GraphConfig::default()).build(&docs);
        let sequential = ResonanceGraphBuilder::new(GraphConfig {
            parallel: false,
            ..Default::default()
        })
        .build(&docs);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let docs = vec![
            doc("x", Category::General, &[0.5, 0.5]),
            doc("c", Category::General, &[0.5, 0.5]),
            doc("a", Category::General, &[0.5, 0.5]),
        ];
        let graph = ResonanceGraphBuilder::default().build(&docs);
        let ids: Vec<&str> = graph.neighbors("x").iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_each_row_scores_from_its_own_pattern() {
        // same shared index, different interval labels: octave vs fifth
        let octave = WavePattern::from_parts(vec![20.0, 40.0], vec![1.0, 1.0], vec![0.0, 0.0])
            .expect("valid");
        let fifth = WavePattern::from_parts(vec![20.0, 30.0], vec![1.0, 1.0], vec![0.0, 0.0])
            .expect("valid");
        let forward = ingestion_resonance(&octave, &fifth);
        let backward = ingestion_resonance(&fifth, &octave);
        assert!(forward - backward > 0.05);

        let docs = vec![
            Document::new("octave", Category::General, Some(octave)),
            Document::new("fifth", Category::General, Some(fifth)),
        ];
        for parallel in [true, false] {
            let graph = ResonanceGraphBuilder::new(GraphConfig {
                similarity_threshold: 0.0,
                parallel,
                ..Default::default()
            })
            .build(&docs);
            assert_eq!(graph.link_score("octave", "fifth"), Some(forward));
            assert_eq!(graph.link_score("fifth", "octave"), Some(backward));
        }
    }

    #[test]
    fn test_group_by_category_first_seen_order() {
        let docs = vec![
            doc("1", Category::Rsvp, &[1.0]),
            doc("2", Category::General, &[1.0]),
            doc("3", Category::Rsvp, &[1.0]),
        ];
        let groups = group_by_category(&docs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Rsvp);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, Category::General);
    }
}
