// Analysis module - feature extraction over decoded sample buffers
//
// This module coordinates the feature extraction pipeline: spectral
// centroid, zero-crossing rate, mel-mapped coefficient vector, and a
// polyphony estimate, computed from channel 0 of a `SampleBuffer`.
//
// Module organization:
// - fft: magnitude spectrum computation (no windowing)
// - spectral: frame-averaged spectral centroid
// - temporal: zero-crossing rate
// - coefficients: first-frame mel-mapped vector
// - polyphony: peak-count heuristic
// - types: aggregate FeatureReport
// - mod.rs: coordinator (FeatureExtractor)
//
// Every public computation is synchronous, side-effect-free, and safe to
// run from multiple threads at once; each call allocates only its own
// transient frame and spectrum buffers.

pub mod coefficients;
pub mod fft;
pub mod polyphony;
pub mod spectral;
pub mod temporal;
mod types;

pub use types::{AudioFormat, FeatureReport, ASSUMED_BIT_DEPTH};

use tracing::debug;

use crate::audio::SampleBuffer;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

use coefficients::CoefficientAnalyzer;
use polyphony::PolyphonyDetector;
use spectral::SpectralAnalyzer;
use temporal::zero_crossing_rate;

/// FeatureExtractor coordinates the feature extraction pipeline
///
/// Holds the analysis parameters; per-buffer analyzers are built on each
/// call because the sample rate comes from the buffer itself.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: AnalysisConfig,
}

impl FeatureExtractor {
    /// Create a new extractor with the given analysis parameters.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Extract all features from a sample buffer.
    ///
    /// Analysis reads channel 0 only. Signals shorter than one frame
    /// yield the documented defaults: centroid 0.0, non-polyphonic, and
    /// a coefficient vector computed from a zero-padded first frame.
    ///
    /// # Arguments
    /// * `buffer` - Decoded audio (validated at construction)
    ///
    /// # Returns
    /// * `Ok(FeatureReport)` - All features plus format metadata
    /// * `Err(AnalysisError)` - Invalid analysis parameters
    pub fn analyze(&self, buffer: &SampleBuffer) -> Result<FeatureReport, AnalysisError> {
        let cfg = &self.config;
        let sample_rate = buffer.sample_rate();
        let channel = buffer.channel(0);

        let spectral = SpectralAnalyzer::new(
            sample_rate,
            cfg.centroid_frame_size,
            cfg.centroid_hop_size,
        )?;
        let coefficients = CoefficientAnalyzer::new(
            sample_rate,
            cfg.coefficient_frame_size,
            cfg.coefficient_hop_size,
            cfg.coefficient_count,
        )?;
        let polyphony = PolyphonyDetector::new(
            cfg.polyphony_frame_size,
            cfg.polyphony_hop_size,
            cfg.peak_floor_ratio,
            cfg.peak_count_threshold,
            cfg.polyphonic_fraction,
        )?;

        let report = FeatureReport {
            centroid_hz: spectral.centroid(channel),
            zero_crossing_rate: zero_crossing_rate(channel),
            coefficients: coefficients.coefficients(channel),
            polyphonic: polyphony.is_polyphonic(channel),
            format: AudioFormat {
                sample_rate,
                channels: buffer.channel_count(),
                bit_depth: ASSUMED_BIT_DEPTH,
                duration_secs: buffer.duration_secs(),
            },
        };

        debug!(
            centroid_hz = report.centroid_hz,
            zcr = report.zero_crossing_rate,
            polyphonic = report.polyphonic,
            duration_secs = report.format.duration_secs,
            "extracted audio features"
        );

        Ok(report)
    }
}
