//! Resonance scoring between two wave patterns.
//!
//! One scorer serves both ingestion and queries. Per aligned index `i`:
//!
//! ```text
//! freq_match      = 1 / (1 + |fa - fb| / 100)
//! amp_corr        = 1 - |aa - ab|                 (unclamped)
//! phase_coherence = cos(|pa - pb|)
//! harmonic_bonus  = Π tag bonus over shared tags   (ingestion)
//!                 | preference ratio bonus or 1.0   (query)
//! component       = freq_match · amp_corr · phase_coherence · harmonic_bonus
//! ```
//!
//! The score is the mean component over the shorter pattern's length.
//! Passing a [`SearchContext`] selects the query-time variant, which adds the
//! harmonic-preference bonus and emotional modulation, and ignores
//! intra-vector tags; `None` is the ingestion-time variant used for graph
//! building, which rewards shared tags.
//!
//! `amp_corr` goes negative when amplitudes differ by more than 1 and then
//! flips the sign of the component together with an opposite phase. This is
//! kept for score compatibility with existing indexes.

mod modulation;

use crate::config::constants::scoring::FREQUENCY_FALLOFF_HZ;
use crate::types::SearchContext;
use crate::wave::{HarmonicTag, WavePattern};

/// Resonance between `a` and `b`, optionally modulated by a query context.
///
/// Returns 0.0 when either pattern is empty.
pub fn resonance(a: &WavePattern, b: &WavePattern, modulation: Option<&SearchContext>) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let total: f32 = (0..n).map(|i| component(a, b, i, modulation)).sum();
    total / n as f32
}

/// Ingestion-time resonance: no emotional or preference modulation.
#[inline]
pub fn ingestion_resonance(a: &WavePattern, b: &WavePattern) -> f32 {
    resonance(a, b, None)
}

/// Query-time resonance under `ctx`.
#[inline]
pub fn query_resonance(query: &WavePattern, candidate: &WavePattern, ctx: &SearchContext) -> f32 {
    resonance(query, candidate, Some(ctx))
}

fn component(a: &WavePattern, b: &WavePattern, i: usize, modulation: Option<&SearchContext>) -> f32 {
    let (fa, fb) = (a.frequencies()[i], b.frequencies()[i]);

    let freq_match = 1.0 / (1.0 + (fa - fb).abs() / FREQUENCY_FALLOFF_HZ);
    let amp_corr = 1.0 - (a.amplitudes()[i] - b.amplitudes()[i]).abs();
    let phase_coherence = (a.phases()[i] - b.phases()[i]).abs().cos();

    let harmonic_bonus = match modulation {
        Some(ctx) => {
            let ratio = if fb > 0.0 { fa / fb } else { 1.0 };
            ctx.harmonic_preference.ratio_bonus(ratio).unwrap_or(1.0)
        }
        None => shared_tag_bonus(&a.harmonics()[i], &b.harmonics()[i]),
    };

    let value = freq_match * amp_corr * phase_coherence * harmonic_bonus;

    match modulation {
        Some(ctx) => ctx.modulate_component(value, amp_corr),
        None => value,
    }
}

/// Product of tag bonuses over every tag pair referencing the same earlier
/// index, using the first pattern's interval label.
fn shared_tag_bonus(tags_a: &[HarmonicTag], tags_b: &[HarmonicTag]) -> f32 {
    let mut bonus = 1.0;
    for ta in tags_a {
        for tb in tags_b {
            if ta.index == tb.index {
                bonus *= ta.interval.tag_bonus();
            }
        }
    }
    bonus
}
