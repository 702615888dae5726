//! End-to-end checks across ingestion, graph building, search and harmonics.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wave_resonance_core::config::{GraphConfig, ResonanceConfig};
use wave_resonance_core::wave::vector_to_wave;
use wave_resonance_core::{
    Category, CategoryIndex, Document, EmotionalState, HarmonicPreference, HarmonicType,
    HarmonicsFinder, IndexSnapshot, Ingestor, ResonanceGraphBuilder, SearchContext, SearchEngine,
    SnapshotHandle, SourceRecord, WavePattern,
};

fn filler() -> String {
    "the quick brown fox jumps over the lazy dog ".repeat(4)
}

fn record(path: &str, lead: &str, embedding: Vec<f32>) -> SourceRecord {
    SourceRecord {
        path: path.to_string(),
        content: format!("{} {}", lead, filler()),
        embedding: Some(embedding),
    }
}

fn corpus() -> Vec<Document> {
    let ingestor = Ingestor::default();
    let records = vec![
        record("lib/rsvp/scalar_fields.txt", "harmony", vec![0.9, 0.8, 0.7, 0.6]),
        record("lib/rsvp/vector_flows.pdf", "coherence", vec![0.85, 0.8, 0.7, 0.6]),
        record("lib/rsvp/entropy_notes.txt", "entropy collapse", vec![0.2, 0.9, 0.1, 0.6]),
        record("lib/physics/field_equations.pdf", "plain", vec![0.9, 0.8, 0.7, 0.6]),
        record("lib/physics/gauge.txt", "plain", vec![-0.9, -0.8, 0.7, 0.6]),
        record("lib/misc/short.txt", "", Vec::new()),
    ];
    records
        .into_iter()
        .filter_map(|r| ingestor.ingest_record(r))
        .collect()
}

#[test]
fn ingest_build_search_roundtrip() {
    let config = ResonanceConfig::default();
    let docs = corpus();
    assert_eq!(docs.len(), 6);

    let builder = ResonanceGraphBuilder::new(config.graph.clone());
    let snapshot = IndexSnapshot::build(docs, &builder).expect("unique ids");

    // RSVP documents link among themselves, never to physics
    for (id, links) in snapshot.graph().iter() {
        let category = snapshot.get(id.as_str()).map(|d| d.category);
        for link in links {
            assert_eq!(snapshot.get(link.id.as_str()).map(|d| d.category), category);
        }
    }

    let engine = SearchEngine::new(config.search.clone());
    let query = vector_to_wave(&[0.9, 0.8, 0.7, 0.6]);
    let hits = snapshot.search(
        &engine,
        &query,
        &SearchContext::default(),
        Some(Category::Rsvp),
        config.search.default_top_k,
    );
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].document.title(), "Scalar Fields");
    assert!(hits.iter().all(|h| h.document.category == Category::Rsvp));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn empty_vector_document_never_scores() {
    let docs = corpus();
    let empty = docs
        .iter()
        .find(|d| d.metadata.path == "lib/misc/short.txt")
        .expect("ingested");
    assert_eq!(empty.wave.as_ref().map(WavePattern::len), Some(0));

    let snapshot = IndexSnapshot::build(docs, &ResonanceGraphBuilder::default()).expect("build");
    assert!(!snapshot.graph().contains(snapshot.documents()[5].id.as_str()));
}

#[test]
fn raw_outranks_focused_for_identical_waves() {
    let wave = vector_to_wave(&[0.3, 0.6, 0.9]);
    let docs = vec![Document::new("only", Category::General, Some(wave.clone()))];
    let engine = SearchEngine::default();
    let graph = Default::default();

    let focused = engine.search(&wave, &SearchContext::default(), &docs, None, &graph, 1);
    let raw = engine.search(
        &wave,
        &SearchContext::new(EmotionalState::Raw),
        &docs,
        None,
        &graph,
        1,
    );
    assert!(focused[0].score > 0.0);
    assert!(raw[0].score > focused[0].score);
}

#[test]
fn rerank_is_deterministic_across_runs() {
    let docs = corpus();
    let builder = ResonanceGraphBuilder::default();
    let first = IndexSnapshot::build(docs.clone(), &builder).expect("build");
    let second = IndexSnapshot::build(docs, &builder).expect("build");
    assert_eq!(first.graph(), second.graph());

    let ctx = SearchContext::new(EmotionalState::Graceland)
        .with_vulnerability(0.9)
        .with_preference(HarmonicPreference::Fifths);
    let query = vector_to_wave(&[0.9, 0.8, 0.7, 0.6]);
    let engine = SearchEngine::default();
    let a: Vec<_> = first
        .search(&engine, &query, &ctx, None, 10)
        .iter()
        .map(|h| (h.document.id.clone(), h.score))
        .collect();
    let b: Vec<_> = second
        .search(&engine, &query, &ctx, None, 10)
        .iter()
        .map(|h| (h.document.id.clone(), h.score))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn graph_properties_hold_for_random_corpora() {
    let mut rng = ChaCha8Rng::seed_from_u64(314);
    for round in 0..5 {
        let k = 1 + round * 2;
        let threshold = 0.2 + round as f32 * 0.1;
        let docs: Vec<Document> = (0..30)
            .map(|i| {
                let v: Vec<f32> = (0..24).map(|_| rng.gen_range(-0.3..1.0)).collect();
                Document::new(
                    format!("r{}-{}", round, i),
                    Category::ALL[i % 3],
                    Some(vector_to_wave(&v)),
                )
            })
            .collect();
        let graph = ResonanceGraphBuilder::new(GraphConfig {
            similarity_threshold: threshold,
            max_neighbors: k,
            parallel: true,
        })
        .build(&docs);

        for (_, links) in graph.iter() {
            assert!(links.len() <= k);
            assert!(links.iter().all(|l| l.score > threshold));
        }
    }
}

#[test]
fn harmonics_octave_scenario() {
    let base = WavePattern::from_parts(vec![20.0], vec![1.0], vec![0.0]).expect("valid");
    let octave = WavePattern::from_parts(vec![40.0], vec![1.0], vec![0.0]).expect("valid");
    let docs = vec![
        Document::new("base", Category::General, Some(base)),
        Document::new("octave", Category::General, Some(octave)),
    ];
    let matches = HarmonicsFinder::default().find("base", HarmonicType::Octave, &docs);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].relationship.to_string(), "octave");
    assert!(matches[0].harmonic_score >= 1.0);
}

#[test]
fn category_artifacts_cover_every_document() {
    let snapshot = IndexSnapshot::build(corpus(), &ResonanceGraphBuilder::default()).expect("build");
    let indices: Vec<CategoryIndex> = snapshot.category_indices();
    let total: usize = indices.iter().map(|ix| ix.document_count).sum();
    assert_eq!(total, snapshot.len());
    let linked: usize = indices.iter().map(|ix| ix.resonance_graph.len()).sum();
    assert_eq!(linked, snapshot.graph().len());
}

#[test]
fn handle_swaps_whole_snapshots() {
    let handle = SnapshotHandle::default();
    assert!(handle.current().is_empty());

    let snapshot = IndexSnapshot::build(corpus(), &ResonanceGraphBuilder::default()).expect("build");
    handle.replace(snapshot);
    let current = handle.current();
    assert_eq!(current.len(), 6);
    assert_eq!(current.master().total_documents, 6);
}
