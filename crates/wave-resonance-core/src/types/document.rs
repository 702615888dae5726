//! Document records indexed by the resonance engine.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResonanceError;
use crate::ingest::heuristics::truncate_chars;
use crate::wave::WavePattern;

/// Opaque document identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Subject category of a document. Graph links never cross categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "RSVP")]
    Rsvp,
    #[serde(rename = "epistemology")]
    Epistemology,
    #[serde(rename = "physics")]
    Physics,
    #[serde(rename = "astrophysics")]
    Astrophysics,
    #[serde(rename = "infrastructure")]
    Infrastructure,
    #[serde(rename = "semantic_theory")]
    SemanticTheory,
    #[serde(rename = "mimetic_theory")]
    MimeticTheory,
    #[default]
    #[serde(rename = "general")]
    General,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Rsvp,
        Category::Epistemology,
        Category::Physics,
        Category::Astrophysics,
        Category::Infrastructure,
        Category::SemanticTheory,
        Category::MimeticTheory,
        Category::General,
    ];

    /// Stable label, also used in artifact file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rsvp => "RSVP",
            Category::Epistemology => "epistemology",
            Category::Physics => "physics",
            Category::Astrophysics => "astrophysics",
            Category::Infrastructure => "infrastructure",
            Category::SemanticTheory => "semantic_theory",
            Category::MimeticTheory => "mimetic_theory",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ResonanceError;

    /// Exact label match; "RSVP" is the only upper-case label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ResonanceError::UnknownLabel {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Source format class of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    AcademicPaper,
    TextDocument,
    WebArchive,
    LatexSource,
    AudioTranscript,
    #[default]
    Unknown,
}

impl DocType {
    /// Classify by file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => DocType::AcademicPaper,
            "txt" => DocType::TextDocument,
            "mhtml" | "mht" | "html" => DocType::WebArchive,
            "tex" | "bib" => DocType::LatexSource,
            "mp3" => DocType::AudioTranscript,
            _ => DocType::Unknown,
        }
    }

    /// Types considered primary sources for importance weighting.
    #[inline]
    pub fn is_primary(self) -> bool {
        matches!(self, DocType::AcademicPaper | DocType::TextDocument)
    }
}

/// Display data carried alongside a document. Never inspected by scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    /// Path relative to the corpus root.
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub doc_type: DocType,
    #[serde(default)]
    pub ingested_at: Option<DateTime<Utc>>,
    /// Source file extension including the dot (".pdf"); empty when absent.
    #[serde(default)]
    pub extension: String,
    /// Source file size in bytes. Unknown for pre-extracted records.
    #[serde(default)]
    pub file_size: Option<u64>,
    /// Source file modification time. Unknown for pre-extracted records.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    /// First `max_chars` characters of the content.
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }
}

/// An indexed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub category: Category,
    /// Absent when the embedding could not be produced; such documents are
    /// skipped by scoring, graph building and harmonics.
    #[serde(default)]
    pub wave: Option<WavePattern>,
    /// In [-1, 1].
    #[serde(default)]
    pub emotional_valence: f32,
    /// In [0, 1].
    #[serde(default = "default_importance")]
    pub importance: f32,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

fn default_importance() -> f32 {
    0.5
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, category: Category, wave: Option<WavePattern>) -> Self {
        Self {
            id: id.into(),
            category,
            wave,
            emotional_valence: 0.0,
            importance: default_importance(),
            metadata: DocumentMetadata::default(),
        }
    }

    #[must_use]
    pub fn with_valence(mut self, valence: f32) -> Self {
        self.emotional_valence = valence.clamp(-1.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_importance(mut self, importance: f32) -> Self {
        self.importance = importance.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}
