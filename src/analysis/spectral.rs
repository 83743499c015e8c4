// Spectral module - frame-averaged spectral centroid
//
// The centroid is the energy-weighted mean frequency of a spectrum, a
// brightness proxy. Frames advance by the hop size along channel 0 until
// fewer than a full frame remains; each frame's centroid is taken over
// the first half of bins only (the mirrored half above Nyquist is
// excluded) and silent frames are dropped from the running average.

use crate::analysis::fft::FftProcessor;
use crate::error::AnalysisError;

/// Spectral centroid computation over overlapping frames
pub struct SpectralAnalyzer {
    sample_rate: u32,
    hop_size: usize,
    fft: FftProcessor,
}

impl SpectralAnalyzer {
    /// Create a new spectral analyzer.
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `frame_size` - Transform length; must be a positive power of two
    /// * `hop_size` - Samples to advance between frames, must be > 0
    pub fn new(
        sample_rate: u32,
        frame_size: usize,
        hop_size: usize,
    ) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate);
        }
        if hop_size == 0 {
            return Err(AnalysisError::InvalidHopSize);
        }

        Ok(Self {
            sample_rate,
            hop_size,
            fft: FftProcessor::new(frame_size)?,
        })
    }

    /// Compute the mean spectral centroid of one channel.
    ///
    /// Formula per frame: centroid = Σ(f_i × |X[i]|) / Σ|X[i]| over the
    /// first half of bins, with f_i = i × sample_rate / frame_size.
    /// Frames whose magnitude sum is zero contribute neither to the
    /// numerator nor the frame count.
    ///
    /// # Returns
    /// Mean centroid in Hz; 0.0 when no frame produced a non-zero spectrum
    pub fn centroid(&self, samples: &[f32]) -> f32 {
        let frame_size = self.fft.frame_size();
        let mut sum = 0.0f64;
        let mut frames = 0usize;

        let mut start = 0;
        while start + frame_size <= samples.len() {
            let spectrum = self.fft.magnitude_spectrum(&samples[start..start + frame_size]);
            if let Some(value) = self.frame_centroid(&spectrum) {
                sum += value as f64;
                frames += 1;
            }
            start += self.hop_size;
        }

        if frames == 0 {
            0.0
        } else {
            (sum / frames as f64) as f32
        }
    }

    /// Centroid of a single magnitude spectrum; None for silent frames.
    fn frame_centroid(&self, spectrum: &[f32]) -> Option<f32> {
        let bin_width = self.sample_rate as f32 / spectrum.len() as f32;

        let mut weighted_sum = 0.0f32;
        let mut magnitude_sum = 0.0f32;
        for (i, &magnitude) in spectrum[..spectrum.len() / 2].iter().enumerate() {
            weighted_sum += i as f32 * bin_width * magnitude;
            magnitude_sum += magnitude;
        }

        if magnitude_sum > 0.0 {
            Some(weighted_sum / magnitude_sum)
        } else {
            None
        }
    }
}
