//! Keyword heuristics that derive document attributes from path and text.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::constants::ingest::{
    BASE_IMPORTANCE, CATEGORY_SCAN_CHARS, DOCUMENT_ID_HEX_LEN, NEGATIVE_KEYWORDS,
    POSITIVE_KEYWORDS, PRIMARY_TYPE_IMPORTANCE_BOOST, RSVP_IMPORTANCE_BOOST,
    VALENCE_IMPORTANCE_WEIGHT,
};
use crate::types::{Category, DocType, DocumentId};

/// Stable ID: leading hex characters of the SHA-256 of the source path.
pub fn document_id(source_path: &str) -> DocumentId {
    let mut hash = hex::encode(Sha256::digest(source_path.as_bytes()));
    hash.truncate(DOCUMENT_ID_HEX_LEN);
    DocumentId::new(hash)
}

/// Title from the file stem: `_` and `-` become spaces, then title case.
pub fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    title_case(&stem.replace(['_', '-'], " "))
}

/// Upper-case letters that follow a non-letter, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Category from path keywords, falling back to the opening text for some.
///
/// "astrophysics" is tested before "physics", which it contains.
pub fn categorize(path: &str, content: &str) -> Category {
    let path = path.to_lowercase();
    let head = truncate_chars(content, CATEGORY_SCAN_CHARS).to_lowercase();
    let in_path = |kw: &str| path.contains(kw);
    let anywhere = |kw: &str| path.contains(kw) || head.contains(kw);

    if anywhere("rsvp") {
        Category::Rsvp
    } else if in_path("epistemology") {
        Category::Epistemology
    } else if in_path("astrophysics") {
        Category::Astrophysics
    } else if in_path("physics") {
        Category::Physics
    } else if in_path("infrastructure") {
        Category::Infrastructure
    } else if anywhere("semantic") {
        Category::SemanticTheory
    } else if anywhere("mimetic") {
        Category::MimeticTheory
    } else {
        Category::General
    }
}

/// Extension of `path` with its leading dot, or empty.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Document type from the path's extension.
pub fn doc_type_of(path: &Path) -> DocType {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(DocType::Unknown, DocType::from_extension)
}

/// Balance of positive over negative keywords present in `content`.
///
/// Each keyword counts once regardless of repetitions. In [-1, 1]; 0.0 when
/// no keyword occurs.
pub fn emotional_valence(content: &str) -> f32 {
    let lower = content.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count();
    let positive = count(POSITIVE_KEYWORDS);
    let negative = count(NEGATIVE_KEYWORDS);
    if positive + negative == 0 {
        return 0.0;
    }
    (positive as f32 - negative as f32) / (positive + negative) as f32
}

/// Importance in [0, 1] from category, type and valence.
pub fn importance(category: Category, doc_type: DocType, valence: f32) -> f32 {
    let mut score = BASE_IMPORTANCE;
    if category == Category::Rsvp {
        score += RSVP_IMPORTANCE_BOOST;
    }
    if doc_type.is_primary() {
        score += PRIMARY_TYPE_IMPORTANCE_BOOST;
    }
    score += valence.abs() * VALENCE_IMPORTANCE_WEIGHT;
    score.min(1.0)
}

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_stable_prefix() {
        let id = document_id("/library/physics/field_theory.pdf");
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, document_id("/library/physics/field_theory.pdf"));
        assert_ne!(id, document_id("/library/physics/field_theory.txt"));
    }

    #[test]
    fn test_document_id_known_digest() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(document_id("abc").as_str(), "ba7816bf8f01cfea");
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(
            title_from_path(Path::new("papers/semantic_field-THEORY.pdf")),
            "Semantic Field Theory"
        );
        assert_eq!(title_from_path(Path::new("notes/2nd_draft.txt")), "2Nd Draft");
        assert_eq!(title_from_path(Path::new("")), "");
    }

    #[test]
    fn test_categorize_by_path() {
        assert_eq!(categorize("lib/RSVP/intro.txt", ""), Category::Rsvp);
        assert_eq!(categorize("lib/epistemology/a.txt", ""), Category::Epistemology);
        assert_eq!(categorize("lib/astrophysics/a.txt", ""), Category::Astrophysics);
        assert_eq!(categorize("lib/physics/a.txt", ""), Category::Physics);
        assert_eq!(categorize("lib/infrastructure/a.txt", ""), Category::Infrastructure);
        assert_eq!(categorize("lib/misc/a.txt", ""), Category::General);
    }

    #[test]
    fn test_categorize_by_content_head() {
        assert_eq!(categorize("lib/a.txt", "An RSVP framing"), Category::Rsvp);
        assert_eq!(categorize("lib/a.txt", "on semantic fields"), Category::SemanticTheory);
        assert_eq!(categorize("lib/a.txt", "Mimetic desire"), Category::MimeticTheory);
        // content keywords never select path-only categories
        assert_eq!(categorize("lib/a.txt", "physics"), Category::General);
        // only the opening characters are scanned
        let late = format!("{}semantic", "x".repeat(1000));
        assert_eq!(categorize("lib/a.txt", &late), Category::General);
    }

    #[test]
    fn test_doc_type_of() {
        assert_eq!(doc_type_of(Path::new("a/b.pdf")), DocType::AcademicPaper);
        assert_eq!(doc_type_of(Path::new("a/b.TXT")), DocType::TextDocument);
        assert_eq!(doc_type_of(Path::new("a/b")), DocType::Unknown);
    }

    #[test]
    fn test_emotional_valence() {
        assert_eq!(emotional_valence("nothing to see"), 0.0);
        assert_eq!(emotional_valence("Harmony and insight"), 1.0);
        assert_eq!(emotional_valence("chaos, chaos, CHAOS"), -1.0);
        // two positive, one negative
        let v = emotional_valence("resonance and coherence amid collapse");
        assert!((v - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_importance() {
        assert_eq!(importance(Category::General, DocType::Unknown, 0.0), 0.5);
        assert!((importance(Category::General, DocType::AcademicPaper, -0.5) - 0.65).abs() < 1e-6);
        assert_eq!(importance(Category::Rsvp, DocType::TextDocument, 1.0), 1.0);
    }

    #[test]
    fn test_extension_keeps_dot() {
        assert_eq!(extension_of(Path::new("papers/field.PDF")), ".PDF");
        assert_eq!(extension_of(Path::new("notes/archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("hi", 0), "");
    }
}
