//! CLI errors and process exit codes.
//!
//! Exit codes:
//! - 0: Success (results on stdout)
//! - 1: Recoverable error (bad input, unreadable files, unknown IDs)
//! - 2: Stored index is corrupted and must be rebuilt

use thiserror::Error;
use wave_resonance_core::ResonanceError;
use wave_resonance_storage::StorageError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    // ========== Input Errors ==========
    /// An input file could not be read or parsed.
    #[error("Invalid input '{path}': {message}")]
    Input { path: String, message: String },

    // ========== Index Errors ==========
    /// Core operation failed (configuration, context, lookup).
    #[error(transparent)]
    Resonance(#[from] ResonanceError),

    /// The document store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    // ========== Output Errors ==========
    /// Results could not be encoded.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn input(path: impl Into<String>, message: impl ToString) -> Self {
        CliError::Input {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// Recoverable error, reported on stderr
    Warning = 1,
    /// Stored index is damaged
    Corrupted = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&CliError> for CliExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Storage(e) if e.is_corruption() => CliExitCode::Corrupted,
            CliError::Storage(_) => CliExitCode::Warning,
            CliError::Input { .. } => CliExitCode::Warning,
            CliError::Resonance(_) => CliExitCode::Warning,
            CliError::Output(_) => CliExitCode::Warning,
        }
    }
}

/// Exit code for a command result.
pub fn exit_code_for_error(err: &CliError) -> CliExitCode {
    CliExitCode::from(err)
}
