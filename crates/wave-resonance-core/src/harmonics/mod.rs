//! Document-to-document harmonic relationships.
//!
//! Where the resonance scorer compares aligned components, the harmonics
//! finder asks whether one document's frequencies sit at a musical interval
//! above another's. Per aligned index the ratio `other / base` is classified,
//! first match wins, and weighted: octave 1.0, fifth 0.8, fourth 0.7.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::constants::{harmonics, interval, wave};
use crate::config::HarmonicsConfig;
use crate::error::ResonanceError;
use crate::types::Document;
use crate::wave::{HarmonicInterval, WavePattern};

/// Which intervals a harmonics lookup counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HarmonicType {
    #[default]
    All,
    Octave,
    Fifth,
    Fourth,
}

impl HarmonicType {
    pub const ALL: [HarmonicType; 4] = [
        HarmonicType::All,
        HarmonicType::Octave,
        HarmonicType::Fifth,
        HarmonicType::Fourth,
    ];

    fn admits(self, interval: HarmonicInterval) -> bool {
        match self {
            HarmonicType::All => true,
            HarmonicType::Octave => interval == HarmonicInterval::Octave,
            HarmonicType::Fifth => interval == HarmonicInterval::Fifth,
            HarmonicType::Fourth => interval == HarmonicInterval::Fourth,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HarmonicType::All => "all",
            HarmonicType::Octave => "octave",
            HarmonicType::Fifth => "fifth",
            HarmonicType::Fourth => "fourth",
        }
    }
}

impl fmt::Display for HarmonicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonicType {
    type Err = ResonanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ResonanceError::UnknownLabel {
                kind: "harmonic type",
                value: s.to_string(),
            })
    }
}

/// Named relationship between two documents' first frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relationship {
    Unison,
    Octave,
    PerfectFifth,
    PerfectFourth,
    MajorThird,
    MinorThird,
    /// No named interval; carries the raw ratio.
    Ratio(f32),
    /// A pattern is empty or the base frequency is zero.
    Undefined,
}

impl Relationship {
    /// Classify `base` against `other` by their first frequencies.
    pub fn between(base: &WavePattern, other: &WavePattern) -> Self {
        let (Some(&fb), Some(&fo)) = (base.frequencies().first(), other.frequencies().first())
        else {
            return Relationship::Undefined;
        };
        if fb == 0.0 {
            return Relationship::Undefined;
        }
        Self::from_ratio(fo / fb)
    }

    pub fn from_ratio(ratio: f32) -> Self {
        let near = |target: f32| (ratio - target).abs() < wave::INTERVAL_TOLERANCE;
        if (ratio - 1.0).abs() < interval::UNISON_TOLERANCE {
            Relationship::Unison
        } else if near(interval::OCTAVE_RATIO) {
            Relationship::Octave
        } else if near(interval::FIFTH_RATIO) {
            Relationship::PerfectFifth
        } else if near(interval::FOURTH_RATIO) {
            Relationship::PerfectFourth
        } else if near(interval::MAJOR_THIRD_RATIO) {
            Relationship::MajorThird
        } else if near(interval::MINOR_THIRD_RATIO) {
            Relationship::MinorThird
        } else {
            Relationship::Ratio(ratio)
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::Unison => f.write_str("unison"),
            Relationship::Octave => f.write_str("octave"),
            Relationship::PerfectFifth => f.write_str("perfect_fifth"),
            Relationship::PerfectFourth => f.write_str("perfect_fourth"),
            Relationship::MajorThird => f.write_str("major_third"),
            Relationship::MinorThird => f.write_str("minor_third"),
            Relationship::Ratio(r) => write!(f, "ratio_{:.2}", r),
            Relationship::Undefined => f.write_str("undefined"),
        }
    }
}

impl Serialize for Relationship {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A document standing in harmonic relation to the base document.
#[derive(Debug, Clone, Serialize)]
pub struct HarmonicMatch<'a> {
    pub document: &'a Document,
    pub harmonic_score: f32,
    pub relationship: Relationship,
}

/// Finds documents harmonically related to a given one.
#[derive(Debug, Clone, Default)]
pub struct HarmonicsFinder {
    config: HarmonicsConfig,
}

impl HarmonicsFinder {
    pub fn new(config: HarmonicsConfig) -> Self {
        Self { config }
    }

    /// Rank every other document by harmonic strength relative to `doc_id`.
    ///
    /// Empty when `doc_id` is unknown or has no wave pattern. Documents
    /// scoring zero are left out.
    pub fn find<'a>(
        &self,
        doc_id: &str,
        harmonic_type: HarmonicType,
        documents: &'a [Document],
    ) -> Vec<HarmonicMatch<'a>> {
        let Some(base) = documents
            .iter()
            .find(|d| d.id.as_str() == doc_id)
            .and_then(|d| d.wave.as_ref())
        else {
            debug!(doc_id, "Harmonics base missing or without wave");
            return Vec::new();
        };

        let mut matches: Vec<HarmonicMatch<'a>> = documents
            .iter()
            .filter(|d| d.id.as_str() != doc_id)
            .filter_map(|doc| {
                let other = doc.wave.as_ref()?;
                let score = harmonic_score(base, other, harmonic_type);
                (score > 0.0).then(|| HarmonicMatch {
                    document: doc,
                    harmonic_score: score,
                    relationship: Relationship::between(base, other),
                })
            })
            .collect();

        matches.sort_by(|a, b| b.harmonic_score.total_cmp(&a.harmonic_score));
        matches.truncate(self.config.max_results);

        debug!(
            doc_id,
            harmonic_type = %harmonic_type,
            matches = matches.len(),
            "Harmonics lookup complete"
        );
        matches
    }
}

/// Sum of interval weights over aligned indices.
pub fn harmonic_score(base: &WavePattern, other: &WavePattern, harmonic_type: HarmonicType) -> f32 {
    base.frequencies()
        .iter()
        .zip(other.frequencies())
        .map(|(&fb, &fo)| {
            let ratio = if fb > 0.0 { fo / fb } else { 0.0 };
            HarmonicInterval::ALL
                .into_iter()
                .filter(|&iv| harmonic_type.admits(iv))
                .find(|iv| iv.matches(ratio))
                .map_or(0.0, interval_weight)
        })
        .sum()
}

fn interval_weight(interval: HarmonicInterval) -> f32 {
    match interval {
        HarmonicInterval::Octave => harmonics::OCTAVE_WEIGHT,
        HarmonicInterval::Fifth => harmonics::FIFTH_WEIGHT,
        HarmonicInterval::Fourth => harmonics::FOURTH_WEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn pattern(frequencies: &[f32]) -> WavePattern {
        let n = frequencies.len();
        WavePattern::from_parts(frequencies.to_vec(), vec![1.0; n], vec![0.0; n]).unwrap()
    }

    fn doc(id: &str, frequencies: &[f32]) -> Document {
        Document::new(id, Category::General, Some(pattern(frequencies)))
    }

    #[test]
    fn test_octave_lookup() {
        let docs = vec![doc("base", &[20.0]), doc("up", &[40.0])];
        let matches = HarmonicsFinder::default().find("base", HarmonicType::Octave, &docs);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].document.id.as_str(), "up");
        assert_eq!(matches[0].relationship.to_string(), "octave");
        assert!(matches[0].harmonic_score >= 1.0);
    }

    #[test]
    fn test_type_filter_excludes_other_intervals() {
        let docs = vec![doc("base", &[100.0]), doc("fifth", &[150.0])];
        let finder = HarmonicsFinder::default();
        assert!(finder.find("base", HarmonicType::Octave, &docs).is_empty());
        let fifths = finder.find("base", HarmonicType::Fifth, &docs);
        assert_eq!(fifths.len(), 1);
        assert!((fifths[0].harmonic_score - 0.8).abs() < 1e-6);
        assert_eq!(fifths[0].relationship, Relationship::PerfectFifth);
    }

    #[test]
    fn test_overlapping_windows_count_once() {
        // 1.42 lies in both the fifth and fourth windows; the fifth wins
        let base = pattern(&[100.0]);
        let other = pattern(&[142.0]);
        assert!((harmonic_score(&base, &other, HarmonicType::All) - 0.8).abs() < 1e-6);
        // with fifths excluded the fourth branch applies
        assert!((harmonic_score(&base, &other, HarmonicType::Fourth) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_scores_sum_over_indices() {
        let base = pattern(&[100.0, 100.0, 100.0]);
        let other = pattern(&[200.0, 150.0, 133.0]);
        let score = harmonic_score(&base, &other, HarmonicType::All);
        assert!((score - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_aligned_positional_waves_score_zero() {
        // transformed vectors of equal length share frequencies: ratio 1.0
        let base = crate::wave::vector_to_wave(&[0.1, 0.2, 0.3]);
        let other = crate::wave::vector_to_wave(&[0.9, -0.2, 0.3]);
        assert_eq!(harmonic_score(&base, &other, HarmonicType::All), 0.0);
        assert_eq!(Relationship::between(&base, &other), Relationship::Unison);
    }

    #[test]
    fn test_unknown_or_waveless_base_is_empty() {
        let docs = vec![
            doc("a", &[20.0]),
            Document::new("ghost", Category::General, None),
        ];
        let finder = HarmonicsFinder::default();
        assert!(finder.find("missing", HarmonicType::All, &docs).is_empty());
        assert!(finder.find("ghost", HarmonicType::All, &docs).is_empty());
    }

    #[test]
    fn test_sorted_and_truncated() {
        let mut docs = vec![doc("base", &[100.0, 100.0])];
        docs.push(doc("one", &[200.0, 90.0]));
        docs.push(doc("two", &[200.0, 200.0]));
        docs.push(doc("none", &[300.0, 300.0]));
        let finder = HarmonicsFinder::new(HarmonicsConfig { max_results: 1 });
        let matches = finder.find("base", HarmonicType::All, &docs);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].document.id.as_str(), "two");
        assert!((matches[0].harmonic_score - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_relationship_labels() {
        assert_eq!(Relationship::from_ratio(1.02).to_string(), "unison");
        assert_eq!(Relationship::from_ratio(1.5).to_string(), "perfect_fifth");
        assert_eq!(Relationship::from_ratio(1.36).to_string(), "perfect_fourth");
        // 1.26 is within the fourth window too, which is checked first
        assert_eq!(Relationship::from_ratio(1.26).to_string(), "perfect_fourth");
        assert_eq!(Relationship::from_ratio(1.12).to_string(), "minor_third");
        assert_eq!(Relationship::from_ratio(3.0).to_string(), "ratio_3.00");
        assert_eq!(
            Relationship::between(&pattern(&[0.0]), &pattern(&[20.0])).to_string(),
            "undefined"
        );
        assert_eq!(
            Relationship::between(&WavePattern::empty(), &pattern(&[20.0])),
            Relationship::Undefined
        );
    }

    #[test]
    fn test_relationship_serializes_as_label() {
        let json = serde_json::to_string(&Relationship::Ratio(2.5)).unwrap();
        assert_eq!(json, "\"ratio_2.50\"");
    }

    #[test]
    fn test_parse_harmonic_type() {
        assert_eq!("OCTAVE".parse::<HarmonicType>().unwrap(), HarmonicType::Octave);
        assert_eq!("all".parse::<HarmonicType>().unwrap(), HarmonicType::All);
        assert!("tritone".parse::<HarmonicType>().is_err());
    }
}
