//! Per-subsystem configuration sections.

use serde::{Deserialize, Serialize};

/// Resonance graph construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Links must score strictly above this to be kept (default: 0.5).
    pub similarity_threshold: f32,
    /// Maximum neighbors retained per document (default: 10).
    pub max_neighbors: usize,
    /// Score rows on the rayon pool (default: true).
    pub parallel: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.5,
            max_neighbors: 10,
            parallel: true,
        }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.similarity_threshold.is_finite() {
            return Err(format!(
                "similarity_threshold must be finite, got {}",
                self.similarity_threshold
            ));
        }
        if self.max_neighbors == 0 {
            return Err("max_neighbors must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Query-time ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned when the caller does not say (default: 10).
    pub default_top_k: usize,
    /// Neighbor boost: score x (1 + neighbor_score x rerank_weight) (default: 0.5).
    pub rerank_weight: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: 10,
            rerank_weight: 0.5,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_top_k == 0 {
            return Err("default_top_k must be greater than 0".to_string());
        }
        if !self.rerank_weight.is_finite() || self.rerank_weight < 0.0 {
            return Err(format!(
                "rerank_weight must be a non-negative number, got {}",
                self.rerank_weight
            ));
        }
        Ok(())
    }
}

/// Harmonics finder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonicsConfig {
    /// Matches returned per lookup (default: 10).
    pub max_results: usize,
}

impl Default for HarmonicsConfig {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

impl HarmonicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Document ingestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Sources whose trimmed text is shorter than this are skipped (default: 100).
    pub min_content_chars: usize,
    /// Stored content is truncated to this many characters (default: 10000).
    pub max_content_chars: usize,
    /// Leading characters handed to the embedding provider (default: 512).
    pub embed_prefix_chars: usize,
    /// Characters shown as a result preview (default: 200).
    pub preview_chars: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 100,
            max_content_chars: 10_000,
            embed_prefix_chars: 512,
            preview_chars: 200,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.embed_prefix_chars == 0 {
            return Err("embed_prefix_chars must be greater than 0".to_string());
        }
        if self.max_content_chars < self.min_content_chars {
            return Err(format!(
                "max_content_chars ({}) must be >= min_content_chars ({})",
                self.max_content_chars, self.min_content_chars
            ));
        }
        Ok(())
    }
}
