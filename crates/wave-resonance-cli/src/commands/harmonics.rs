//! `harmonics` command

use clap::Args;
use serde::Serialize;

use wave_resonance_core::{Category, DocumentId, HarmonicType, HarmonicsFinder, Relationship};

use super::{finish, print_json, CommandContext};
use crate::error::CliError;

/// Arguments for the `harmonics` command
#[derive(Args, Debug)]
pub struct HarmonicsArgs {
    /// Base document ID
    pub doc_id: String,

    /// Interval to look for: all | octave | fifth | fourth
    #[arg(long = "type", default_value = "all")]
    pub harmonic_type: HarmonicType,
}

#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    id: &'a DocumentId,
    title: &'a str,
    category: Category,
    harmonic_score: f32,
    relationship: Relationship,
}

pub async fn harmonics_command(args: HarmonicsArgs, ctx: &CommandContext) -> i32 {
    finish(run(args, ctx).await)
}

async fn run(args: HarmonicsArgs, ctx: &CommandContext) -> Result<(), CliError> {
    let snapshot = ctx.store.load_snapshot().await?;
    snapshot.require(&args.doc_id)?;

    let finder = HarmonicsFinder::new(ctx.config.harmonics.clone());
    let matches = snapshot.find_harmonics(&finder, &args.doc_id, args.harmonic_type);
    let rows: Vec<MatchRow<'_>> = matches
        .iter()
        .map(|m| MatchRow {
            id: &m.document.id,
            title: m.document.title(),
            category: m.document.category,
            harmonic_score: m.harmonic_score,
            relationship: m.relationship,
        })
        .collect();
    print_json(&rows)
}
