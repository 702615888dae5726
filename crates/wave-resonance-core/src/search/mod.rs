//! Query-time ranking pipeline.
//!
//! ```text
//! candidates ─► category filter ─► modulated resonance ─► valence weight
//!            ─► importance weight ─► sort ─► graph re-rank ─► top-k
//! ```
//!
//! The engine never fails: malformed input (empty query, unknown category
//! label, out-of-range context) produces an empty result.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::constants::scoring::IMPORTANCE_BASE;
use crate::config::SearchConfig;
use crate::graph::ResonanceGraph;
use crate::scoring::query_resonance;
use crate::types::{Category, Document, SearchContext};
use crate::wave::WavePattern;

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: f32,
}

/// Ranks candidate documents against a query wave pattern.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank `candidates` against `query` under `ctx`.
    ///
    /// Returns at most `top_k` hits, strongest first. Candidates without a
    /// wave pattern are skipped. When the context prefers a harmonic, the
    /// graph neighbors of the top hit are boosted by
    /// `1 + link_score * rerank_weight` and the list is re-sorted; this is a
    /// single hop from the top hit only.
    pub fn search<'a>(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        candidates: impl IntoIterator<Item = &'a Document>,
        category_filter: Option<Category>,
        graph: &ResonanceGraph,
        top_k: usize,
    ) -> Vec<SearchHit<'a>> {
        if query.is_empty() || top_k == 0 {
            return Vec::new();
        }
        if let Err(e) = ctx.validate() {
            warn!(error = %e, "Rejected search context");
            return Vec::new();
        }

        let mut scanned = 0usize;
        let mut hits: Vec<SearchHit<'a>> = candidates
            .into_iter()
            .filter(|doc| category_filter.map_or(true, |c| doc.category == c))
            .inspect(|_| scanned += 1)
            .filter_map(|doc| {
                let wave = doc.wave.as_ref()?;
                let score = weighted_score(query, wave, doc, ctx);
                (!score.is_nan()).then_some(SearchHit {
                    document: doc,
                    score,
                })
            })
            .collect();

        sort_hits(&mut hits);

        if ctx.harmonic_preference.reranks() {
            self.rerank(&mut hits, graph);
        }

        hits.truncate(top_k);

        debug!(
            state = %ctx.emotional_state,
            preference = %ctx.harmonic_preference,
            category = ?category_filter,
            candidates = scanned,
            hits = hits.len(),
            "Search complete"
        );
        hits
    }

    /// As [`search`](Self::search), with the category filter given as a label.
    ///
    /// An unknown label matches nothing.
    pub fn search_by_label<'a>(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        candidates: impl IntoIterator<Item = &'a Document>,
        category_label: Option<&str>,
        graph: &ResonanceGraph,
        top_k: usize,
    ) -> Vec<SearchHit<'a>> {
        let filter = match category_label.map(str::parse::<Category>).transpose() {
            Ok(filter) => filter,
            Err(e) => {
                debug!(error = %e, "Unknown category filter, no matches");
                return Vec::new();
            }
        };
        self.search(query, ctx, candidates, filter, graph, top_k)
    }

    /// Boost graph neighbors of the top hit and re-sort.
    fn rerank(&self, hits: &mut [SearchHit<'_>], graph: &ResonanceGraph) {
        let Some((top, rest)) = hits.split_first_mut() else {
            return;
        };
        let top_id = top.document.id.as_str();
        if !graph.contains(top_id) {
            return;
        }

        for hit in rest.iter_mut() {
            if let Some(link_score) = graph.link_score(top_id, hit.document.id.as_str()) {
                hit.score *= 1.0 + link_score * self.config.rerank_weight;
            }
        }
        sort_hits(hits);
    }
}

fn weighted_score(query: &WavePattern, wave: &WavePattern, doc: &Document, ctx: &SearchContext) -> f32 {
    let mut score = query_resonance(query, wave, ctx);
    if ctx.emotional_state.weighs_valence() {
        score *= 1.0 + doc.emotional_valence.abs();
    }
    score * (IMPORTANCE_BASE + doc.importance)
}

/// Stable descending sort; equal scores keep candidate order.
fn sort_hits(hits: &mut [SearchHit<'_>]) {
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
}
