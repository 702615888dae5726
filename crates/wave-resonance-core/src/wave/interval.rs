//! Named harmonic intervals used as intra-vector tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::constants::{interval, scoring, wave};
use crate::error::ResonanceError;

/// A frequency-ratio class recognized by the transform.
///
/// Classification is first-match in declaration order, so a ratio inside
/// both the fifth and fourth tolerance windows (1.40..1.43) is a fifth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicInterval {
    Octave,
    Fifth,
    Fourth,
}

impl HarmonicInterval {
    /// All intervals in classification order.
    pub const ALL: [HarmonicInterval; 3] = [
        HarmonicInterval::Octave,
        HarmonicInterval::Fifth,
        HarmonicInterval::Fourth,
    ];

    /// Nominal frequency ratio of this interval.
    #[inline]
    pub fn ratio(self) -> f32 {
        match self {
            HarmonicInterval::Octave => interval::OCTAVE_RATIO,
            HarmonicInterval::Fifth => interval::FIFTH_RATIO,
            HarmonicInterval::Fourth => interval::FOURTH_RATIO,
        }
    }

    /// Whether `ratio` lies within tolerance of this interval.
    #[inline]
    pub fn matches(self, ratio: f32) -> bool {
        (ratio - self.ratio()).abs() < wave::INTERVAL_TOLERANCE
    }

    /// First interval whose tolerance window contains `ratio`.
    pub fn classify(ratio: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.matches(ratio))
    }

    /// Multiplier applied by the scorer when both patterns carry this tag.
    #[inline]
    pub fn tag_bonus(self) -> f32 {
        match self {
            HarmonicInterval::Octave => scoring::TAG_OCTAVE_BONUS,
            HarmonicInterval::Fifth => scoring::TAG_FIFTH_BONUS,
            HarmonicInterval::Fourth => scoring::TAG_FOURTH_BONUS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HarmonicInterval::Octave => "octave",
            HarmonicInterval::Fifth => "fifth",
            HarmonicInterval::Fourth => "fourth",
        }
    }
}

impl fmt::Display for HarmonicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonicInterval {
    type Err = ResonanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "octave" => Ok(HarmonicInterval::Octave),
            "fifth" => Ok(HarmonicInterval::Fifth),
            "fourth" => Ok(HarmonicInterval::Fourth),
            _ => Err(ResonanceError::UnknownLabel {
                kind: "harmonic interval",
                value: s.to_string(),
            }),
        }
    }
}

/// An intra-vector harmonic tag: dimension `index` (earlier than the tagged
/// dimension) stands in `interval` relation to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HarmonicTag {
    pub index: usize,
    pub interval: HarmonicInterval,
}

impl HarmonicTag {
    pub fn new(index: usize, interval: HarmonicInterval) -> Self {
        Self { index, interval }
    }
}
