//! Query-time modulation context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResonanceError, ResonanceResult};

/// Mood under which a query is run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    /// Precision over emotion; components are not modulated.
    #[default]
    Focused,
    /// Rewards closely matching amplitudes, dampens the rest.
    Happy,
    /// Unfiltered: scaled by truth amplification.
    Raw,
    /// Vulnerable: scaled by the vulnerability coefficient.
    Graceland,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 4] = [
        EmotionalState::Focused,
        EmotionalState::Happy,
        EmotionalState::Raw,
        EmotionalState::Graceland,
    ];

    /// States under which a document's emotional valence boosts its score.
    #[inline]
    pub fn weighs_valence(self) -> bool {
        matches!(self, EmotionalState::Raw | EmotionalState::Graceland)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionalState::Focused => "focused",
            EmotionalState::Happy => "happy",
            EmotionalState::Raw => "raw",
            EmotionalState::Graceland => "graceland",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = ResonanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ResonanceError::UnknownLabel {
                kind: "emotional state",
                value: s.to_string(),
            })
    }
}

/// Which frequency relationship a query favors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicPreference {
    /// Tag-based harmonic bonus; no graph re-ranking.
    #[default]
    Balanced,
    Octaves,
    Fifths,
    /// Favors the tritone.
    Dissonant,
}

impl HarmonicPreference {
    pub const ALL: [HarmonicPreference; 4] = [
        HarmonicPreference::Balanced,
        HarmonicPreference::Octaves,
        HarmonicPreference::Fifths,
        HarmonicPreference::Dissonant,
    ];

    /// Whether the search engine applies the graph re-ranking pass.
    #[inline]
    pub fn reranks(self) -> bool {
        !matches!(self, HarmonicPreference::Balanced)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HarmonicPreference::Balanced => "balanced",
            HarmonicPreference::Octaves => "octaves",
            HarmonicPreference::Fifths => "fifths",
            HarmonicPreference::Dissonant => "dissonant",
        }
    }
}

impl fmt::Display for HarmonicPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonicPreference {
    type Err = ResonanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pref| pref.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ResonanceError::UnknownLabel {
                kind: "harmonic preference",
                value: s.to_string(),
            })
    }
}

/// Per-query modulation parameters. Immutable for the duration of a search.
///
/// # Example
///
/// ```
/// use wave_resonance_core::types::{EmotionalState, HarmonicPreference, SearchContext};
///
/// let ctx = SearchContext::new(EmotionalState::Graceland)
///     .with_vulnerability(0.9)
///     .with_truth_amplification(2.0)
///     .with_preference(HarmonicPreference::Octaves);
/// assert!(ctx.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchContext {
    pub emotional_state: EmotionalState,
    pub harmonic_preference: HarmonicPreference,
    /// Positive multiplier used by raw mode (default: 1.0).
    pub truth_amplification: f32,
    /// In [0, 1], used by graceland mode (default: 0.5).
    pub vulnerability_coefficient: f32,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self {
            emotional_state: EmotionalState::Focused,
            harmonic_preference: HarmonicPreference::Balanced,
            truth_amplification: 1.0,
            vulnerability_coefficient: 0.5,
        }
    }
}

impl SearchContext {
    pub fn new(emotional_state: EmotionalState) -> Self {
        Self {
            emotional_state,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_preference(mut self, preference: HarmonicPreference) -> Self {
        self.harmonic_preference = preference;
        self
    }

    #[must_use]
    pub fn with_truth_amplification(mut self, amplification: f32) -> Self {
        self.truth_amplification = amplification;
        self
    }

    #[must_use]
    pub fn with_vulnerability(mut self, coefficient: f32) -> Self {
        self.vulnerability_coefficient = coefficient;
        self
    }

    /// Check numeric fields are in range.
    pub fn validate(&self) -> ResonanceResult<()> {
        if !self.truth_amplification.is_finite() || self.truth_amplification <= 0.0 {
            return Err(ResonanceError::InvalidContext {
                field: "truth_amplification",
                value: self.truth_amplification,
                reason: "must be a positive number",
            });
        }
        if !(0.0..=1.0).contains(&self.vulnerability_coefficient) {
            return Err(ResonanceError::InvalidContext {
                field: "vulnerability_coefficient",
                value: self.vulnerability_coefficient,
                reason: "must be in [0.0, 1.0]",
            });
        }
        Ok(())
    }
}
