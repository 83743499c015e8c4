// Polyphony module - peak-count heuristic
//
// A frame is "polyphonic" when its magnitude spectrum carries more than a
// threshold number of peaks: interior bins whose magnitude exceeds 10% of
// the frame maximum and strictly exceeds both neighbors. The signal is
// classified polyphonic when the fraction of polyphonic frames exceeds
// 30%. Zero frames classify as non-polyphonic.

use crate::analysis::fft::FftProcessor;
use crate::error::AnalysisError;

/// Peak-counting polyphony detection over overlapping frames
pub struct PolyphonyDetector {
    hop_size: usize,
    peak_floor_ratio: f32,
    peak_count_threshold: usize,
    polyphonic_fraction: f32,
    fft: FftProcessor,
}

impl PolyphonyDetector {
    /// Create a new polyphony detector.
    ///
    /// # Arguments
    /// * `frame_size` - Transform length; must be a positive power of two
    /// * `hop_size` - Samples to advance between frames, must be > 0
    /// * `peak_floor_ratio` - Fraction of the frame maximum a bin must
    ///   exceed to count as a peak
    /// * `peak_count_threshold` - Peaks per frame above which the frame is
    ///   polyphonic
    /// * `polyphonic_fraction` - Fraction of polyphonic frames above which
    ///   the whole signal is polyphonic
    pub fn new(
        frame_size: usize,
        hop_size: usize,
        peak_floor_ratio: f32,
        peak_count_threshold: usize,
        polyphonic_fraction: f32,
    ) -> Result<Self, AnalysisError> {
        if hop_size == 0 {
            return Err(AnalysisError::InvalidHopSize);
        }

        Ok(Self {
            hop_size,
            peak_floor_ratio,
            peak_count_threshold,
            polyphonic_fraction,
            fft: FftProcessor::new(frame_size)?,
        })
    }

    /// Classify one channel as polyphonic or not.
    pub fn is_polyphonic(&self, samples: &[f32]) -> bool {
        let frame_size = self.fft.frame_size();
        let mut frames = 0usize;
        let mut polyphonic_frames = 0usize;

        let mut start = 0;
        while start + frame_size <= samples.len() {
            let spectrum = self.fft.magnitude_spectrum(&samples[start..start + frame_size]);
            if self.count_peaks(&spectrum) > self.peak_count_threshold {
                polyphonic_frames += 1;
            }
            frames += 1;
            start += self.hop_size;
        }

        if frames == 0 {
            return false;
        }
        polyphonic_frames as f32 / frames as f32 > self.polyphonic_fraction
    }

    /// Count spectral peaks: interior bins above the floor that strictly
    /// exceed both neighbors.
    fn count_peaks(&self, spectrum: &[f32]) -> usize {
        let max_magnitude = spectrum.iter().cloned().fold(0.0f32, f32::max);
        if max_magnitude <= 0.0 {
            return 0;
        }

        let floor = self.peak_floor_ratio * max_magnitude;
        spectrum
            .windows(3)
            .filter(|w| w[1] > floor && w[1] > w[0] && w[1] > w[2])
            .count()
    }
}
