// FFT module - magnitude spectrum computation
//
// Computes the complex DFT of one real-valued frame and returns per-bin
// magnitudes for the full frame length, mirrored half included. No window
// function is applied before the transform, so tones that fall between
// bins leak across the spectrum; this is a known precision limitation of
// the analysis recipe, preserved rather than corrected.

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::{Arc, Mutex};

use crate::error::AnalysisError;

/// FFT processor that computes magnitude spectra from analysis frames
pub struct FftProcessor {
    fft_planner: Arc<Mutex<FftPlanner<f32>>>,
    frame_size: usize,
}

impl std::fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftProcessor")
            .field("frame_size", &self.frame_size)
            .finish_non_exhaustive()
    }
}

impl FftProcessor {
    /// Create a new FFT processor.
    ///
    /// # Arguments
    /// * `frame_size` - Transform length; must be a positive power of two
    pub fn new(frame_size: usize) -> Result<Self, AnalysisError> {
        if frame_size == 0 || !frame_size.is_power_of_two() {
            return Err(AnalysisError::InvalidFrameSize { frame_size });
        }

        Ok(Self {
            fft_planner: Arc::new(Mutex::new(FftPlanner::new())),
            frame_size,
        })
    }

    /// Transform length in samples.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Compute the magnitude spectrum of one frame.
    ///
    /// Frames shorter than the transform length are zero-padded; longer
    /// input is truncated. Bin `i` holds `sqrt(re_i² + im_i²)` of the
    /// complex DFT output, for all `frame_size` bins.
    ///
    /// # Arguments
    /// * `frame` - Real-valued samples for one analysis window
    ///
    /// # Returns
    /// Magnitude spectrum (length = frame_size)
    pub fn magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .take(self.frame_size)
            .map(|&sample| Complex::new(sample, 0.0))
            .collect();
        buffer.resize(self.frame_size, Complex::new(0.0, 0.0));

        let fft = {
            let mut planner = self.fft_planner.lock().unwrap();
            planner.plan_fft_forward(self.frame_size)
        };
        fft.process(&mut buffer);

        buffer.iter().map(|c| c.norm()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sine at an exact bin frequency so no spectral leakage occurs
    fn bin_aligned_sine(frame_size: usize, bin: usize, amplitude: f32) -> Vec<f32> {
        (0..frame_size)
            .map(|i| {
                let phase = 2.0 * std::f64::consts::PI * bin as f64 * i as f64 / frame_size as f64;
                phase.sin() as f32 * amplitude
            })
            .collect()
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(FftProcessor::new(1000).is_err());
        assert!(FftProcessor::new(0).is_err());
        assert!(FftProcessor::new(1024).is_ok());
    }

    #[test]
    fn test_zero_frame_yields_zero_spectrum() {
        for frame_size in [256, 1024, 2048] {
            let fft = FftProcessor::new(frame_size).unwrap();
            let spectrum = fft.magnitude_spectrum(&vec![0.0; frame_size]);
            assert_eq!(spectrum.len(), frame_size);
            assert!(
                spectrum.iter().all(|&m| m == 0.0),
                "expected all-zero spectrum for size {}",
                frame_size
            );
        }
    }

    #[test]
    fn test_sine_dominant_bin() {
        let frame_size = 2048;
        let bin = 20;
        let fft = FftProcessor::new(frame_size).unwrap();
        let spectrum = fft.magnitude_spectrum(&bin_aligned_sine(frame_size, bin, 0.5));

        let dominant = spectrum[..frame_size / 2]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(dominant, bin, "dominant bin should match the tone");

        // Mirrored half carries the same peak
        assert!((spectrum[bin] - spectrum[frame_size - bin]).abs() < 0.5);
    }

    #[test]
    fn test_short_frame_is_zero_padded() {
        let fft = FftProcessor::new(1024).unwrap();
        let spectrum = fft.magnitude_spectrum(&[1.0; 16]);
        assert_eq!(spectrum.len(), 1024);
        // DC bin sums the 16 unit samples
        assert!((spectrum[0] - 16.0).abs() < 1e-3);
    }
}
