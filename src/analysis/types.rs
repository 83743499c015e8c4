// Types module - aggregate output of the feature extraction pipeline

use serde::{Deserialize, Serialize};

/// Bit depth reported for all decoded audio. The analysis pipeline works
/// on normalized floats, so the source depth is assumed constant.
pub const ASSUMED_BIT_DEPTH: u16 = 16;

/// Format metadata echoed alongside the extracted features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels in the source buffer
    pub channels: usize,
    /// Assumed source bit depth
    pub bit_depth: u16,
    /// Duration in seconds
    pub duration_secs: f32,
}

/// Features extracted from one sample buffer
///
/// All analysis reads channel 0 only; multi-channel sources are accepted
/// but additional channels are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Spectral centroid in Hz (energy-weighted mean frequency), a
    /// brightness proxy
    pub centroid_hz: f32,

    /// Zero-crossing rate in [0, 1], a noisiness proxy
    pub zero_crossing_rate: f32,

    /// Mel-mapped coefficient vector (fixed length)
    pub coefficients: Vec<f32>,

    /// Whether the signal carries multiple simultaneous dominant
    /// frequency components
    pub polyphonic: bool,

    /// Source format metadata
    pub format: AudioFormat,
}
