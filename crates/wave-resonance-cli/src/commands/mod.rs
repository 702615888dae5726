//! CLI command handlers
//!
//! # Modules
//!
//! - `ingest`: Build the index from JSON-lines source records
//! - `search`: Rank documents against a query vector or a stored document
//! - `harmonics`: List documents harmonically related to one document
//! - `stats`: Summarize the stored index
//!
//! Every handler writes its result to stdout as JSON and returns a process
//! exit code.

pub mod harmonics;
pub mod ingest;
pub mod search;
pub mod stats;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error};

use wave_resonance_core::ResonanceConfig;
use wave_resonance_storage::JsonDirectoryStore;

use crate::error::{exit_code_for_error, CliError, CliExitCode};

/// Configuration and store shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: ResonanceConfig,
    pub store: JsonDirectoryStore,
}

impl CommandContext {
    /// Load the optional TOML config, apply `RESONANCE_*` overrides and
    /// validate.
    pub fn load(data_dir: PathBuf, config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ResonanceConfig::from_file(path)?,
            None => ResonanceConfig::default(),
        }
        .with_env_overrides();
        config.validate()?;

        debug!(data_dir = %data_dir.display(), ?config_path, "Command context ready");
        Ok(Self {
            config,
            store: JsonDirectoryStore::new(data_dir),
        })
    }
}

/// Report a command result and turn it into an exit code.
pub fn finish(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => {
            let code = exit_code_for_error(&e);
            error!(error = %e, exit_code = code as u8, "Command failed");
            eprintln!("Error: {}", e);
            code.into()
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use super::CommandContext;
    use wave_resonance_core::ResonanceConfig;
    use wave_resonance_storage::JsonDirectoryStore;

    pub fn context() -> (TempDir, CommandContext) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let ctx = CommandContext {
            config: ResonanceConfig::default(),
            store: JsonDirectoryStore::new(dir.path().join("index")),
        };
        (dir, ctx)
    }

    /// One JSON line with enough content to pass the length check.
    pub fn record_line(path: &str, lead: &str, embedding: &[f32]) -> String {
        serde_json::json!({
            "path": path,
            "content": format!("{} {}", lead, "steady words fill the page ".repeat(6)),
            "embedding": embedding,
        })
        .to_string()
    }
}
