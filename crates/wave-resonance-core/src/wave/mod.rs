//! Vector-to-wave transform.
//!
//! Each dimension `i` of an embedding becomes one wave component:
//!
//! ```text
//! frequency = min(20 + 100·i, 20000)   positional, independent of the value
//! amplitude = |v|
//! phase     = 0 if v >= 0 else π
//! ```
//!
//! Frequency depends only on position, so two vectors of equal length are
//! always comparable index by index; amplitude and phase carry the signal.
//! Every dimension is additionally tagged with the earlier dimensions whose
//! frequency ratio to it is an octave, fifth or fourth.

mod interval;
mod pattern;

pub use interval::{HarmonicInterval, HarmonicTag};
pub use pattern::WavePattern;

use std::f32::consts::PI;

use crate::config::constants::wave::{BASE_FREQUENCY, FREQUENCY_STEP, MAX_FREQUENCY};

/// Frequency assigned to dimension `index`.
#[inline]
pub fn dimension_frequency(index: usize) -> f32 {
    (BASE_FREQUENCY + index as f32 * FREQUENCY_STEP).min(MAX_FREQUENCY)
}

/// Transform an embedding vector into its wave pattern.
///
/// Total and deterministic; an empty vector yields an empty pattern.
///
/// # Example
///
/// ```
/// use wave_resonance_core::wave::vector_to_wave;
///
/// let wave = vector_to_wave(&[1.0, -1.0]);
/// assert_eq!(wave.frequencies(), &[20.0, 120.0]);
/// assert_eq!(wave.amplitudes(), &[1.0, 1.0]);
/// assert_eq!(wave.phases(), &[0.0, std::f32::consts::PI]);
/// ```
pub fn vector_to_wave(vector: &[f32]) -> WavePattern {
    let frequencies: Vec<f32> = (0..vector.len()).map(dimension_frequency).collect();
    let amplitudes: Vec<f32> = vector.iter().map(|v| v.abs()).collect();
    let phases: Vec<f32> = vector
        .iter()
        .map(|&v| if v >= 0.0 { 0.0 } else { PI })
        .collect();
    let harmonics = pattern::tag_harmonics(&frequencies);

    WavePattern::from_components_unchecked(frequencies, amplitudes, phases, harmonics)
}
