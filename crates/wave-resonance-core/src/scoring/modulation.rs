//! Per-variant modulation functions of the query-time scorer.

use crate::config::constants::{interval, scoring, wave};
use crate::types::{EmotionalState, HarmonicPreference, SearchContext};

impl HarmonicPreference {
    /// Ratio-based harmonic bonus replacing the tag bonus.
    ///
    /// `None` for `Balanced`, which keeps the tag-based bonus. Otherwise the
    /// preferred interval's bonus when `ratio` is within tolerance, else 1.0.
    pub fn ratio_bonus(self, ratio: f32) -> Option<f32> {
        let near = |target: f32| (ratio - target).abs() < wave::INTERVAL_TOLERANCE;
        match self {
            HarmonicPreference::Balanced => None,
            HarmonicPreference::Octaves => Some(if near(interval::OCTAVE_RATIO) {
                scoring::PREFERRED_OCTAVE_BONUS
            } else {
                1.0
            }),
            HarmonicPreference::Fifths => Some(if near(interval::FIFTH_RATIO) {
                scoring::PREFERRED_FIFTH_BONUS
            } else {
                1.0
            }),
            HarmonicPreference::Dissonant => Some(if near(interval::TRITONE_RATIO) {
                scoring::PREFERRED_TRITONE_BONUS
            } else {
                1.0
            }),
        }
    }
}

impl SearchContext {
    /// Scale one per-index component by the emotional state.
    pub fn modulate_component(&self, component: f32, amp_corr: f32) -> f32 {
        match self.emotional_state {
            EmotionalState::Focused => component,
            EmotionalState::Raw => component * scoring::RAW_GAIN * self.truth_amplification,
            EmotionalState::Graceland => {
                component * self.vulnerability_coefficient * scoring::GRACELAND_GAIN
            }
            EmotionalState::Happy => {
                if amp_corr > scoring::HAPPY_AMPLITUDE_THRESHOLD {
                    component * scoring::HAPPY_BOOST
                } else {
                    component * scoring::HAPPY_DAMPEN
                }
            }
        }
    }
}
