//! `stats` command
//!
//! Prints the stored index's [`IndexStats`](wave_resonance_core::IndexStats)
//! together with the master index metadata.

use serde::Serialize;

use wave_resonance_core::{IndexStats, MasterIndex};

use super::{finish, print_json, CommandContext};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    data_dir: String,
    master: &'a MasterIndex,
    #[serde(flatten)]
    stats: IndexStats,
}

pub async fn stats_command(ctx: &CommandContext) -> i32 {
    finish(run(ctx).await)
}

async fn run(ctx: &CommandContext) -> Result<(), CliError> {
    let snapshot = ctx.store.load_snapshot().await?;
    print_json(&StatsReport {
        data_dir: ctx.store.root().display().to_string(),
        master: snapshot.master(),
        stats: snapshot.stats(),
    })
}
