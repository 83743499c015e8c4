// Analysis error types

use thiserror::Error;

/// Errors raised by the feature-extraction input boundary.
///
/// The analysis core is a pure computation; these variants cover the
/// malformed inputs that would otherwise surface as out-of-bounds access
/// or NaN results. The surrounding application has no other validation
/// layer for this data, so all four classes fail fast here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Buffer has no channels or a channel with no samples
    #[error("sample buffer must contain at least one channel with samples")]
    EmptyBuffer,

    /// Channel sample arrays have different lengths
    #[error("channel {channel} holds {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    /// Sample rate must be a positive number of Hz
    #[error("sample rate must be greater than 0")]
    InvalidSampleRate,

    /// Transform frames must be a positive power of two
    #[error("frame size must be a positive power of two (got {frame_size})")]
    InvalidFrameSize { frame_size: usize },

    /// Hop size drives frame iteration and must be positive
    #[error("hop size must be greater than 0")]
    InvalidHopSize,

    /// The coefficient vector must have at least one entry
    #[error("coefficient count must be greater than 0")]
    InvalidCoefficientCount,
}
