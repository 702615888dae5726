//! Root configuration for the wave resonance index.
//!
//! # Loading Configuration
//!
//! ```rust,ignore
//! use wave_resonance_core::ResonanceConfig;
//!
//! let config = ResonanceConfig::from_file("resonance.toml")?.with_env_overrides();
//! config.validate()?;
//! ```
//!
//! # TOML Structure
//!
//! ```toml
//! [graph]
//! similarity_threshold = 0.5
//! max_neighbors = 10
//! parallel = true
//!
//! [search]
//! default_top_k = 10
//! rerank_weight = 0.5
//!
//! [harmonics]
//! max_results = 10
//!
//! [ingest]
//! min_content_chars = 100
//! max_content_chars = 10000
//! embed_prefix_chars = 512
//! preview_chars = 200
//! ```
//!
//! Missing sections and keys fall back to their defaults; present values are
//! validated together and the first error wins.

pub mod constants;
mod sections;

pub use sections::{GraphConfig, HarmonicsConfig, IngestConfig, SearchConfig};

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResonanceError, ResonanceResult};

/// Root configuration aggregating all subsystem sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResonanceConfig {
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub harmonics: HarmonicsConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl ResonanceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `ResonanceError::InvalidConfig` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> ResonanceResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ResonanceError::InvalidConfig(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ResonanceError::InvalidConfig(format!(
                "Failed to parse TOML in '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> ResonanceResult<Self> {
        toml::from_str(toml)
            .map_err(|e| ResonanceError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> ResonanceResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ResonanceError::InvalidConfig(format!("Failed to serialize to TOML: {}", e))
        })
    }

    /// Validate all sections, returning the first error found.
    pub fn validate(&self) -> ResonanceResult<()> {
        self.graph
            .validate()
            .map_err(|e| ResonanceError::InvalidConfig(format!("[graph] {}", e)))?;
        self.search
            .validate()
            .map_err(|e| ResonanceError::InvalidConfig(format!("[search] {}", e)))?;
        self.harmonics
            .validate()
            .map_err(|e| ResonanceError::InvalidConfig(format!("[harmonics] {}", e)))?;
        self.ingest
            .validate()
            .map_err(|e| ResonanceError::InvalidConfig(format!("[ingest] {}", e)))?;
        Ok(())
    }

    /// Apply environment variable overrides. Prefix: `RESONANCE_`
    ///
    /// | Variable | Config Path |
    /// |----------|-------------|
    /// | `RESONANCE_GRAPH_THRESHOLD` | `graph.similarity_threshold` |
    /// | `RESONANCE_GRAPH_MAX_NEIGHBORS` | `graph.max_neighbors` |
    /// | `RESONANCE_GRAPH_PARALLEL` | `graph.parallel` |
    /// | `RESONANCE_SEARCH_TOP_K` | `search.default_top_k` |
    /// | `RESONANCE_HARMONICS_MAX_RESULTS` | `harmonics.max_results` |
    /// | `RESONANCE_EMBED_PREFIX_CHARS` | `ingest.embed_prefix_chars` |
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_parse::<f32>("RESONANCE_GRAPH_THRESHOLD") {
            self.graph.similarity_threshold = v;
        }
        if let Some(v) = env_parse::<usize>("RESONANCE_GRAPH_MAX_NEIGHBORS") {
            self.graph.max_neighbors = v;
        }
        if let Some(v) = env_parse::<bool>("RESONANCE_GRAPH_PARALLEL") {
            self.graph.parallel = v;
        }
        if let Some(v) = env_parse::<usize>("RESONANCE_SEARCH_TOP_K") {
            self.search.default_top_k = v;
        }
        if let Some(v) = env_parse::<usize>("RESONANCE_HARMONICS_MAX_RESULTS") {
            self.harmonics.max_results = v;
        }
        if let Some(v) = env_parse::<usize>("RESONANCE_EMBED_PREFIX_CHARS") {
            self.ingest.embed_prefix_chars = v;
        }
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
