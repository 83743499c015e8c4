// SampleBuffer - immutable decoded audio for analysis
//
// One sample array per channel (floating-point amplitudes in [-1, 1]),
// plus the sample rate. Invariants are checked once at construction:
// every channel array has the same non-zero length and the sample rate
// is positive. Analysis borrows a buffer for the duration of one call
// and never retains a reference.

use crate::error::AnalysisError;

/// In-memory decoded audio.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample arrays.
    ///
    /// # Arguments
    /// * `channels` - One sample array per channel, all of equal length
    /// * `sample_rate` - Sample rate in Hz, must be > 0
    ///
    /// # Returns
    /// * `Ok(SampleBuffer)` - Validated buffer
    /// * `Err(AnalysisError)` - Empty input, mismatched channel lengths,
    ///   or a non-positive sample rate
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate);
        }

        let expected = match channels.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(AnalysisError::EmptyBuffer),
        };

        for (index, channel) in channels.iter().enumerate().skip(1) {
            if channel.len() != expected {
                return Err(AnalysisError::ChannelLengthMismatch {
                    channel: index,
                    expected,
                    actual: channel.len(),
                });
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        Self::new(vec![samples], sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels (≥ 1).
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples in each channel.
    pub fn samples_per_channel(&self) -> usize {
        self.channels[0].len()
    }

    /// Samples for one channel. Panics if `index` is out of range; use
    /// `channel_count` to stay in bounds.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Duration in seconds, derived as samples / sample rate.
    pub fn duration_secs(&self) -> f32 {
        self.samples_per_channel() as f32 / self.sample_rate as f32
    }
}
