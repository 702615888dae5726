//! `search` command
//!
//! The query is either an embedding vector read from a JSON file (an array
//! of numbers) or a stored document (`--like <doc-id>`), which is then left
//! out of its own results.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use wave_resonance_core::wave::vector_to_wave;
use wave_resonance_core::{
    Category, DocumentId, EmotionalState, HarmonicPreference, SearchContext, SearchEngine,
    SearchHit,
};

use super::{finish, print_json, CommandContext};
use crate::error::CliError;

/// Arguments for the `search` command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JSON file holding the query embedding
    #[arg(long, required_unless_present = "like", conflicts_with = "like")]
    pub vector: Option<PathBuf>,

    /// Use a stored document's wave pattern as the query
    #[arg(long, value_name = "DOC_ID")]
    pub like: Option<String>,

    /// Emotional state: focused | happy | raw | graceland
    #[arg(long, default_value = "focused")]
    pub state: EmotionalState,

    /// Harmonic preference: balanced | octaves | fifths | dissonant
    #[arg(long, default_value = "balanced")]
    pub preference: HarmonicPreference,

    /// Truth amplification for raw mode
    #[arg(long, default_value_t = 1.0)]
    pub truth: f32,

    /// Vulnerability coefficient for graceland mode, in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub vulnerability: f32,

    /// Restrict results to one category
    #[arg(long)]
    pub category: Option<Category>,

    /// Number of results (default from config)
    #[arg(long)]
    pub top_k: Option<usize>,
}

impl SearchArgs {
    fn context(&self) -> SearchContext {
        SearchContext::new(self.state)
            .with_preference(self.preference)
            .with_truth_amplification(self.truth)
            .with_vulnerability(self.vulnerability)
    }
}

#[derive(Debug, Serialize)]
struct HitRow<'a> {
    rank: usize,
    id: &'a DocumentId,
    title: &'a str,
    category: Category,
    path: &'a str,
    score: f32,
    preview: &'a str,
}

fn rows<'a>(hits: &'a [SearchHit<'a>], preview_chars: usize) -> Vec<HitRow<'a>> {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| HitRow {
            rank: i + 1,
            id: &hit.document.id,
            title: hit.document.title(),
            category: hit.document.category,
            path: &hit.document.metadata.path,
            score: hit.score,
            preview: hit.document.metadata.preview(preview_chars),
        })
        .collect()
}

pub async fn search_command(args: SearchArgs, ctx: &CommandContext) -> i32 {
    finish(run(args, ctx).await)
}

async fn run(args: SearchArgs, ctx: &CommandContext) -> Result<(), CliError> {
    let search_ctx = args.context();
    search_ctx.validate()?;

    let snapshot = ctx.store.load_snapshot().await?;
    let engine = SearchEngine::new(ctx.config.search.clone());
    let top_k = args.top_k.unwrap_or(ctx.config.search.default_top_k);

    let hits = match (&args.like, &args.vector) {
        (Some(doc_id), _) => {
            snapshot.require(doc_id)?;
            snapshot.search_like(&engine, doc_id, &search_ctx, args.category, top_k)
        }
        (None, Some(path)) => {
            let query = vector_to_wave(&read_vector(path).await?);
            snapshot.search(&engine, &query, &search_ctx, args.category, top_k)
        }
        (None, None) => {
            return Err(CliError::input(
                "search",
                "either --vector or --like is required",
            ))
        }
    };

    debug!(
        state = %search_ctx.emotional_state,
        preference = %search_ctx.harmonic_preference,
        hits = hits.len(),
        "Search finished"
    );
    print_json(&rows(&hits, ctx.config.ingest.preview_chars))
}

async fn read_vector(path: &std::path::Path) -> Result<Vec<f32>, CliError> {
    let label = path.display().to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::input(&label, e))?;
    serde_json::from_slice(&bytes).map_err(|e| CliError::input(&label, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ingest::{ingest_command, IngestArgs};
    use crate::commands::test_support::{context, record_line};
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SearchArgs,
    }

    fn parse(argv: &[&str]) -> Result<SearchArgs, clap::Error> {
        Harness::try_parse_from(std::iter::once("search").chain(argv.iter().copied()))
            .map(|h| h.args)
    }

    async fn seeded() -> (tempfile::TempDir, CommandContext) {
        let (dir, ctx) = context();
        let input = dir.path().join("records.jsonl");
        let lines = [
            record_line("rsvp/fields.txt", "harmony", &[0.9, 0.8, 0.7]),
            record_line("rsvp/flows.txt", "coherence", &[0.85, 0.8, 0.7]),
            record_line("misc/notes.txt", "plain", &[0.9, 0.8, 0.7]),
        ];
        std::fs::write(&input, lines.join("\n")).expect("write");
        assert_eq!(ingest_command(IngestArgs { input, append: false }, &ctx).await, 0);
        (dir, ctx)
    }

    #[test]
    fn parses_labels_case_insensitively() {
        let args = parse(&["--like", "abc", "--state", "Graceland", "--preference", "FIFTHS"])
            .expect("parse");
        assert_eq!(args.state, EmotionalState::Graceland);
        assert_eq!(args.preference, HarmonicPreference::Fifths);
        assert_eq!(args.truth, 1.0);
    }

    #[test]
    fn requires_exactly_one_query_source() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--like", "a", "--vector", "q.json"]).is_err());
        assert!(parse(&["--vector", "q.json", "--category", "RSVP"]).is_ok());
        assert!(parse(&["--like", "a", "--category", "rsvp"]).is_err());
    }

    #[tokio::test]
    async fn vector_search_succeeds() {
        let (dir, ctx) = seeded().await;
        let query = dir.path().join("query.json");
        std::fs::write(&query, "[0.9, 0.8, 0.7]").expect("write");

        let args = parse(&["--vector", query.to_str().expect("utf8"), "--category", "RSVP"])
            .expect("parse");
        assert_eq!(search_command(args, &ctx).await, 0);
    }

    #[tokio::test]
    async fn like_search_with_unknown_id_fails() {
        let (_dir, ctx) = seeded().await;
        let args = parse(&["--like", "0000000000000000"]).expect("parse");
        assert_eq!(search_command(args, &ctx).await, 1);
    }

    #[tokio::test]
    async fn out_of_range_vulnerability_fails() {
        let (_dir, ctx) = seeded().await;
        let snapshot = ctx.store.load_snapshot().await.expect("load");
        let id = snapshot.documents()[0].id.to_string();
        let args = parse(&["--like", id.as_str(), "--vulnerability", "1.5"]).expect("parse");
        assert_eq!(search_command(args, &ctx).await, 1);
    }

    #[tokio::test]
    async fn rows_rank_from_one() {
        let (_dir, ctx) = seeded().await;
        let snapshot = ctx.store.load_snapshot().await.expect("load");
        let engine = SearchEngine::default();
        let query = vector_to_wave(&[0.9, 0.8, 0.7]);
        let hits = snapshot.search(&engine, &query, &SearchContext::default(), None, 10);

        let rows = rows(&hits, 5);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, 1);
        assert!(rows.iter().all(|r| r.preview.chars().count() <= 5));
    }
}
