//! `ingest` command
//!
//! Reads JSON-lines source records, one per line:
//!
//! ```json
//! {"path": "rsvp/scalar_fields.txt", "content": "...", "embedding": [0.1, 0.4]}
//! ```
//!
//! builds documents and the resonance graph, and saves the index. With
//! `--append` the stored documents are kept; a record whose path maps to an
//! existing ID replaces that document.
//!
//! # Output
//!
//! A JSON report of records read, documents ingested and the index totals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use wave_resonance_core::{
    Category, Document, DocumentId, IndexSnapshot, Ingestor, ResonanceGraphBuilder, SourceRecord,
};

use super::{finish, print_json, CommandContext};
use crate::error::CliError;

/// Arguments for the `ingest` command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// JSON-lines file of source records ("-" reads stdin)
    pub input: PathBuf,

    /// Merge into the stored index instead of replacing it
    #[arg(long)]
    pub append: bool,
}

#[derive(Debug, Serialize)]
struct IngestReport {
    records: usize,
    ingested: usize,
    skipped: usize,
    total_documents: usize,
    categories: Vec<Category>,
}

pub async fn ingest_command(args: IngestArgs, ctx: &CommandContext) -> i32 {
    finish(run(args, ctx).await)
}

async fn run(args: IngestArgs, ctx: &CommandContext) -> Result<(), CliError> {
    let records = read_records(&args.input).await?;
    let ingestor = Ingestor::new(ctx.config.ingest.clone());

    let total = records.len();
    let fresh: Vec<Document> = records
        .into_iter()
        .filter_map(|record| ingestor.ingest_record(record))
        .collect();
    let ingested = fresh.len();
    if ingested < total {
        warn!(skipped = total - ingested, "Records too short to index were skipped");
    }

    let existing = if args.append {
        ctx.store.load_snapshot().await?.documents().to_vec()
    } else {
        Vec::new()
    };
    let documents = merge_documents(existing, fresh);

    let builder = ResonanceGraphBuilder::new(ctx.config.graph.clone());
    let snapshot = IndexSnapshot::build(documents, &builder)?;
    ctx.store.save_snapshot(&snapshot).await?;

    info!(
        records = total,
        ingested,
        total_documents = snapshot.len(),
        "Ingest complete"
    );
    print_json(&IngestReport {
        records: total,
        ingested,
        skipped: total - ingested,
        total_documents: snapshot.len(),
        categories: snapshot.master().categories.clone(),
    })
}

async fn read_records(input: &Path) -> Result<Vec<SourceRecord>, CliError> {
    let label = input.display().to_string();
    let text = if label == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .map_err(|e| CliError::input(&label, e))?;
        buffer
    } else {
        tokio::fs::read_to_string(input)
            .await
            .map_err(|e| CliError::input(&label, e))?
    };
    parse_records(&label, &text)
}

/// Parse JSON lines, ignoring blank ones.
fn parse_records(label: &str, text: &str) -> Result<Vec<SourceRecord>, CliError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| CliError::input(label, format!("line {}: {}", n + 1, e)))
        })
        .collect()
}

/// Append `incoming` to `existing`; later documents replace earlier ones
/// with the same ID in place.
fn merge_documents(existing: Vec<Document>, incoming: Vec<Document>) -> Vec<Document> {
    let mut merged: Vec<Document> = Vec::with_capacity(existing.len() + incoming.len());
    let mut positions: HashMap<DocumentId, usize> = HashMap::new();
    for doc in existing.into_iter().chain(incoming) {
        match positions.get(&doc.id) {
            Some(&i) => merged[i] = doc,
            None => {
                positions.insert(doc.id.clone(), merged.len());
                merged.push(doc);
            }
        }
    }
    merged
}
