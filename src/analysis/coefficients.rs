// Coefficients module - simplified mel-mapped feature vector
//
// Produces a fixed-length vector of perceptual-scale positions: for each
// coefficient index k, the linear frequency k × sample_rate / frame_size
// mapped through mel(f) = 2595 × log10(1 + f/700). The vector holds these
// mel-mapped positions, not filterbank-weighted energies; no mel
// filterbank, log-energy, or cosine transform is applied. Only the first
// frame of the signal is analyzed and presented as the whole-signal
// vector; the hop size is accepted but never advanced.

use crate::analysis::fft::FftProcessor;
use crate::error::AnalysisError;

const MEL_SCALE: f32 = 2595.0;
const MEL_BREAK_HZ: f32 = 700.0;

/// Map a linear frequency in Hz onto the mel scale.
pub fn hz_to_mel(frequency_hz: f32) -> f32 {
    MEL_SCALE * (1.0 + frequency_hz / MEL_BREAK_HZ).log10()
}

/// First-frame coefficient vector computation
#[derive(Debug)]
pub struct CoefficientAnalyzer {
    sample_rate: u32,
    coefficient_count: usize,
    #[allow(dead_code)]
    hop_size: usize,
    fft: FftProcessor,
}

impl CoefficientAnalyzer {
    /// Create a new coefficient analyzer.
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `frame_size` - Transform length; must be a positive power of two
    /// * `hop_size` - Accepted for parity with the frame-based analyzers
    /// * `coefficient_count` - Output vector length, must be > 0
    pub fn new(
        sample_rate: u32,
        frame_size: usize,
        hop_size: usize,
        coefficient_count: usize,
    ) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate);
        }
        if hop_size == 0 {
            return Err(AnalysisError::InvalidHopSize);
        }
        if coefficient_count == 0 {
            return Err(AnalysisError::InvalidCoefficientCount);
        }

        Ok(Self {
            sample_rate,
            coefficient_count,
            hop_size,
            fft: FftProcessor::new(frame_size)?,
        })
    }

    /// Compute the coefficient vector from the first frame of one channel.
    ///
    /// Signals shorter than the frame size are zero-padded. The spectrum's
    /// length sets the bin spacing of the mapping; its magnitudes do not
    /// enter the result.
    pub fn coefficients(&self, samples: &[f32]) -> Vec<f32> {
        let frame_end = samples.len().min(self.fft.frame_size());
        let spectrum = self.fft.magnitude_spectrum(&samples[..frame_end]);

        (0..self.coefficient_count)
            .map(|k| {
                let frequency = k as f32 * self.sample_rate as f32 / spectrum.len() as f32;
                hz_to_mel(frequency)
            })
            .collect()
    }
}
