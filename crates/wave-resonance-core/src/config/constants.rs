//! Fixed constants of the wave transform and resonance formulas.
//!
//! These are part of the scoring contract: changing any of them changes every
//! stored wave pattern and graph, so they are not exposed through
//! `ResonanceConfig`. Tunable knobs (thresholds, limits) live there instead.

/// Frequency mapping of the vector-to-wave transform.
pub mod wave {
    /// Frequency assigned to dimension 0, in Hz.
    pub const BASE_FREQUENCY: f32 = 20.0;

    /// Frequency increment per dimension, in Hz.
    pub const FREQUENCY_STEP: f32 = 100.0;

    /// Upper bound of the mapped frequency (audible-range ceiling), in Hz.
    pub const MAX_FREQUENCY: f32 = 20_000.0;

    /// Tolerance on a frequency ratio for it to count as a named interval.
    pub const INTERVAL_TOLERANCE: f32 = 0.1;

    /// Version tag written into the master index.
    pub const TRANSFORMER_VERSION: &str = "1.0";
}

/// Frequency ratios of the named harmonic intervals.
pub mod interval {
    pub const OCTAVE_RATIO: f32 = 2.0;
    pub const FIFTH_RATIO: f32 = 1.5;
    pub const FOURTH_RATIO: f32 = 1.33;
    pub const MAJOR_THIRD_RATIO: f32 = 1.25;
    pub const MINOR_THIRD_RATIO: f32 = 1.2;
    /// Tritone, approximately sqrt(2).
    pub const TRITONE_RATIO: f32 = 1.414;

    /// Unison is matched more tightly than the other intervals.
    pub const UNISON_TOLERANCE: f32 = 0.05;
}

/// Multipliers applied by the resonance scorer.
pub mod scoring {
    /// Frequency distance (Hz) at which `freq_match` halves.
    pub const FREQUENCY_FALLOFF_HZ: f32 = 100.0;

    /// Per shared intra-vector tag.
    pub const TAG_OCTAVE_BONUS: f32 = 1.5;
    pub const TAG_FIFTH_BONUS: f32 = 1.3;
    pub const TAG_FOURTH_BONUS: f32 = 1.2;

    /// Ratio-based bonuses selected by the caller's harmonic preference.
    pub const PREFERRED_OCTAVE_BONUS: f32 = 2.0;
    pub const PREFERRED_FIFTH_BONUS: f32 = 1.8;
    pub const PREFERRED_TRITONE_BONUS: f32 = 1.5;

    /// Raw mode: component x RAW_GAIN x truth_amplification.
    pub const RAW_GAIN: f32 = 2.0;
    /// Graceland mode: component x vulnerability_coefficient x GRACELAND_GAIN.
    pub const GRACELAND_GAIN: f32 = 3.0;
    /// Happy mode boosts components whose amplitude correlation exceeds this.
    pub const HAPPY_AMPLITUDE_THRESHOLD: f32 = 0.7;
    pub const HAPPY_BOOST: f32 = 1.3;
    pub const HAPPY_DAMPEN: f32 = 0.7;

    /// Importance weighting: score x (IMPORTANCE_BASE + importance).
    pub const IMPORTANCE_BASE: f32 = 0.5;
}

/// Weights used by the harmonics finder.
pub mod harmonics {
    pub const OCTAVE_WEIGHT: f32 = 1.0;
    pub const FIFTH_WEIGHT: f32 = 0.8;
    pub const FOURTH_WEIGHT: f32 = 0.7;
}

/// Keyword heuristics used during ingestion.
pub mod ingest {
    /// Keywords counted toward positive emotional valence.
    pub const POSITIVE_KEYWORDS: &[&str] = &[
        "resonance",
        "harmony",
        "coherence",
        "unity",
        "consciousness",
        "understanding",
        "insight",
        "breakthrough",
        "innovation",
    ];

    /// Keywords counted toward negative emotional valence.
    pub const NEGATIVE_KEYWORDS: &[&str] =
        &["collapse", "entropy", "fragmentation", "confusion", "chaos"];

    /// Number of leading content characters inspected for category keywords.
    pub const CATEGORY_SCAN_CHARS: usize = 1000;

    /// Hex characters of the path digest kept as the document ID.
    pub const DOCUMENT_ID_HEX_LEN: usize = 16;

    /// Hex characters of the pattern digest kept as the wave hash.
    pub const WAVE_HASH_HEX_LEN: usize = 8;

    pub const BASE_IMPORTANCE: f32 = 0.5;
    pub const RSVP_IMPORTANCE_BOOST: f32 = 0.3;
    pub const PRIMARY_TYPE_IMPORTANCE_BOOST: f32 = 0.1;
    pub const VALENCE_IMPORTANCE_WEIGHT: f32 = 0.1;
}
