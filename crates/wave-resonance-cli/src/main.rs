//! Wave Resonance CLI
//!
//! Command-line front end for the wave resonance document index.
//!
//! # Commands
//!
//! - `ingest <records.jsonl>`: Build (or `--append` to) the index
//! - `search --vector <query.json> | --like <doc-id>`: Ranked search under an
//!   emotional state and harmonic preference
//! - `harmonics <doc-id>`: Harmonically related documents
//! - `stats`: Index summary
//!
//! Results go to stdout as JSON, logs to stderr.
//!
//! # Exit Codes
//! - 0: Success
//! - 1: Recoverable error
//! - 2: Stored index is corrupted

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

use commands::CommandContext;

/// Wave Resonance - wave-pattern document index
#[derive(Parser)]
#[command(name = "wave-resonance")]
#[command(version)]
#[command(about = "Index documents as wave patterns and search them by resonance")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Index directory
    #[arg(long, env = "RESONANCE_DATA_DIR", default_value = "resonance_index", global = true)]
    data_dir: PathBuf,

    /// TOML configuration file
    #[arg(long, env = "RESONANCE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest JSON-lines source records
    Ingest(commands::ingest::IngestArgs),
    /// Search the index
    Search(commands::search::SearchArgs),
    /// Find harmonically related documents
    Harmonics(commands::harmonics::HarmonicsArgs),
    /// Show index statistics
    Stats,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let ctx = match CommandContext::load(cli.data_dir, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => std::process::exit(commands::finish(Err(e))),
    };

    let exit_code = match cli.command {
        Commands::Ingest(args) => commands::ingest::ingest_command(args, &ctx).await,
        Commands::Search(args) => commands::search::search_command(args, &ctx).await,
        Commands::Harmonics(args) => commands::harmonics::harmonics_command(args, &ctx).await,
        Commands::Stats => commands::stats::stats_command(&ctx).await,
    };

    std::process::exit(exit_code);
}
