// Fixtures module - deterministic synthetic sample buffers
//
// The analysis pipeline is exercised against procedurally generated PCM
// rather than real recordings: tests and the CLI's synthetic mode both
// need reproducible buffers without a decoder in the loop. Noise uses a
// seeded RNG so runs are repeatable.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::audio::SampleBuffer;
use crate::error::AnalysisError;

/// Supported deterministic waveform patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntheticPattern {
    /// Pure tone
    Sine { frequency_hz: f32, amplitude: f32 },
    /// Naive square wave (sign of a sine)
    Square { frequency_hz: f32, amplitude: f32 },
    /// Uniform white noise from a seeded RNG
    WhiteNoise { seed: u64, amplitude: f32 },
    /// Sum of equal-amplitude tones
    MultiTone {
        frequencies: Vec<f32>,
        amplitude: f32,
    },
    /// All-zero samples
    Silence,
    /// Strictly alternating +1/-1, the maximal zero-crossing signal
    Alternating,
}

impl SyntheticPattern {
    /// Render this pattern into a mono sample buffer.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz, must be > 0
    /// * `duration_secs` - Length of the rendered signal
    pub fn render(
        &self,
        sample_rate: u32,
        duration_secs: f32,
    ) -> Result<SampleBuffer, AnalysisError> {
        let sample_count = (duration_secs * sample_rate as f32) as usize;
        let samples = match self {
            SyntheticPattern::Sine {
                frequency_hz,
                amplitude,
            } => render_tones(&[*frequency_hz], *amplitude, sample_rate, sample_count),
            SyntheticPattern::Square {
                frequency_hz,
                amplitude,
            } => (0..sample_count)
                .map(|i| {
                    let phase = tau() * *frequency_hz as f64 * i as f64 / sample_rate as f64;
                    if phase.sin() >= 0.0 {
                        *amplitude
                    } else {
                        -*amplitude
                    }
                })
                .collect(),
            SyntheticPattern::WhiteNoise { seed, amplitude } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                (0..sample_count)
                    .map(|_| rng.gen_range(-1.0f32..1.0) * amplitude)
                    .collect()
            }
            SyntheticPattern::MultiTone {
                frequencies,
                amplitude,
            } => render_tones(frequencies, *amplitude, sample_rate, sample_count),
            SyntheticPattern::Silence => vec![0.0; sample_count],
            SyntheticPattern::Alternating => (0..sample_count)
                .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
                .collect(),
        };

        SampleBuffer::mono(samples, sample_rate)
    }
}

/// Frequency of a transform bin: bin × sample_rate / frame_size.
///
/// Tones placed on exact bin frequencies transform without leakage, which
/// keeps spectral assertions tight under the no-window transform.
pub fn bin_frequency(sample_rate: u32, frame_size: usize, bin: usize) -> f32 {
    bin as f32 * sample_rate as f32 / frame_size as f32
}

fn render_tones(
    frequencies: &[f32],
    amplitude: f32,
    sample_rate: u32,
    sample_count: usize,
) -> Vec<f32> {
    // Phase accumulates in f64 so long renders stay spectrally clean
    (0..sample_count)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            frequencies
                .iter()
                .map(|&f| (tau() * f as f64 * t).sin() as f32 * amplitude)
                .sum()
        })
        .collect()
}

fn tau() -> f64 {
    2.0 * std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_length_and_rate() {
        let buffer = SyntheticPattern::Silence.render(44100, 1.0).unwrap();
        assert_eq!(buffer.samples_per_channel(), 44100);
        assert_eq!(buffer.sample_rate(), 44100);
    }

    #[test]
    fn test_sine_stays_in_amplitude_range() {
        let buffer = SyntheticPattern::Sine {
            frequency_hz: 440.0,
            amplitude: 0.5,
        }
        .render(44100, 0.1)
        .unwrap();
        assert!(buffer.channel(0).iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn test_white_noise_is_deterministic_per_seed() {
        let a = SyntheticPattern::WhiteNoise {
            seed: 42,
            amplitude: 1.0,
        }
        .render(8000, 0.1)
        .unwrap();
        let b = SyntheticPattern::WhiteNoise {
            seed: 42,
            amplitude: 1.0,
        }
        .render(8000, 0.1)
        .unwrap();
        let c = SyntheticPattern::WhiteNoise {
            seed: 43,
            amplitude: 1.0,
        }
        .render(8000, 0.1)
        .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_alternating_flips_every_sample() {
        let buffer = SyntheticPattern::Alternating.render(1000, 0.01).unwrap();
        for pair in buffer.channel(0).windows(2) {
            assert_eq!(pair[0], -pair[1]);
        }
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let result = SyntheticPattern::Silence.render(44100, 0.0);
        assert_eq!(result.unwrap_err(), AnalysisError::EmptyBuffer);
    }

    #[test]
    fn test_bin_frequency() {
        assert!((bin_frequency(44100, 2048, 20) - 430.664).abs() < 0.01);
        assert_eq!(bin_frequency(44100, 2048, 0), 0.0);
    }

    #[test]
    fn test_pattern_serde_roundtrip() {
        let pattern = SyntheticPattern::Sine {
            frequency_hz: 440.0,
            amplitude: 0.5,
        };
        let json = serde_json::to_string(&pattern).unwrap();
        assert!(json.contains("sine"));
        let parsed: SyntheticPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pattern);
    }
}
