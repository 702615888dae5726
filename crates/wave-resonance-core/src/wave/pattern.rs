//! Wave pattern: the per-dimension frequency/amplitude/phase form of a vector.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::interval::{HarmonicInterval, HarmonicTag};
use crate::config::constants::ingest::WAVE_HASH_HEX_LEN;
use crate::error::{ResonanceError, ResonanceResult};

/// A wave pattern derived from one embedding vector.
///
/// # Invariants
///
/// - `frequencies`, `amplitudes`, `phases` and `harmonics` have equal length
/// - `harmonics[i]` only references indices `< i`
///
/// Both are enforced on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWavePattern")]
pub struct WavePattern {
    frequencies: Vec<f32>,
    amplitudes: Vec<f32>,
    phases: Vec<f32>,
    harmonics: Vec<Vec<HarmonicTag>>,
}

#[derive(Deserialize)]
struct RawWavePattern {
    frequencies: Vec<f32>,
    amplitudes: Vec<f32>,
    phases: Vec<f32>,
    harmonics: Vec<Vec<HarmonicTag>>,
}

impl TryFrom<RawWavePattern> for WavePattern {
    type Error = ResonanceError;

    fn try_from(raw: RawWavePattern) -> Result<Self, Self::Error> {
        check_lengths(&raw.frequencies, &raw.amplitudes, &raw.phases)?;
        if raw.harmonics.len() != raw.frequencies.len() {
            return Err(ResonanceError::Serialization(format!(
                "harmonics length {} does not match frequencies length {}",
                raw.harmonics.len(),
                raw.frequencies.len()
            )));
        }
        for (i, tags) in raw.harmonics.iter().enumerate() {
            if let Some(tag) = tags.iter().find(|t| t.index >= i) {
                return Err(ResonanceError::Serialization(format!(
                    "harmonic tag at index {} references later index {}",
                    i, tag.index
                )));
            }
        }
        Ok(Self {
            frequencies: raw.frequencies,
            amplitudes: raw.amplitudes,
            phases: raw.phases,
            harmonics: raw.harmonics,
        })
    }
}

impl WavePattern {
    /// An empty pattern, the transform of a zero-length vector.
    pub fn empty() -> Self {
        Self {
            frequencies: Vec::new(),
            amplitudes: Vec::new(),
            phases: Vec::new(),
            harmonics: Vec::new(),
        }
    }

    /// Build a pattern from explicit components.
    ///
    /// Harmonic tags are derived from `frequencies` exactly as the transform
    /// does, so hand-built patterns score like transformed ones.
    ///
    /// # Errors
    ///
    /// `ResonanceError::Serialization` if the component lengths differ.
    pub fn from_parts(
        frequencies: Vec<f32>,
        amplitudes: Vec<f32>,
        phases: Vec<f32>,
    ) -> ResonanceResult<Self> {
        check_lengths(&frequencies, &amplitudes, &phases)?;
        let harmonics = tag_harmonics(&frequencies);
        Ok(Self {
            frequencies,
            amplitudes,
            phases,
            harmonics,
        })
    }

    /// Assemble without validation; callers guarantee the invariants.
    pub(crate) fn from_components_unchecked(
        frequencies: Vec<f32>,
        amplitudes: Vec<f32>,
        phases: Vec<f32>,
        harmonics: Vec<Vec<HarmonicTag>>,
    ) -> Self {
        debug_assert_eq!(frequencies.len(), amplitudes.len());
        debug_assert_eq!(frequencies.len(), phases.len());
        debug_assert_eq!(frequencies.len(), harmonics.len());
        Self {
            frequencies,
            amplitudes,
            phases,
            harmonics,
        }
    }

    #[inline]
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    #[inline]
    pub fn amplitudes(&self) -> &[f32] {
        &self.amplitudes
    }

    #[inline]
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    #[inline]
    pub fn harmonics(&self) -> &[Vec<HarmonicTag>] {
        &self.harmonics
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the highest-amplitude dimension.
    pub fn dominant_frequency(&self) -> Option<f32> {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| self.frequencies[i])
    }

    /// Short content hash of the pattern, stable across runs.
    ///
    /// SHA-256 over the little-endian bytes of every component and tag,
    /// truncated to 8 hex characters.
    pub fn wave_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for ((freq, amp), phase) in self
            .frequencies
            .iter()
            .zip(&self.amplitudes)
            .zip(&self.phases)
        {
            hasher.update(freq.to_le_bytes());
            hasher.update(amp.to_le_bytes());
            hasher.update(phase.to_le_bytes());
        }
        for (i, tags) in self.harmonics.iter().enumerate() {
            for tag in tags {
                hasher.update((i as u64).to_le_bytes());
                hasher.update((tag.index as u64).to_le_bytes());
                hasher.update(tag.interval.as_str().as_bytes());
            }
        }
        let mut hash = hex::encode(hasher.finalize());
        hash.truncate(WAVE_HASH_HEX_LEN);
        hash
    }
}

fn check_lengths(frequencies: &[f32], amplitudes: &[f32], phases: &[f32]) -> ResonanceResult<()> {
    if frequencies.len() != amplitudes.len() || frequencies.len() != phases.len() {
        return Err(ResonanceError::Serialization(format!(
            "wave component lengths differ: frequencies={}, amplitudes={}, phases={}",
            frequencies.len(),
            amplitudes.len(),
            phases.len()
        )));
    }
    Ok(())
}

/// Tag each dimension with the earlier dimensions it stands in a named
/// interval relation to. At most one tag per earlier index.
pub(crate) fn tag_harmonics(frequencies: &[f32]) -> Vec<Vec<HarmonicTag>> {
    frequencies
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            frequencies[..i]
                .iter()
                .enumerate()
                .filter(|&(_, &earlier)| earlier > 0.0)
                .filter_map(|(j, &earlier)| {
                    HarmonicInterval::classify(freq / earlier).map(|iv| HarmonicTag::new(j, iv))
                })
                .collect()
        })
        .collect()
}
