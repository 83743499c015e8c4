// WAV decode boundary - uploaded bytes or files into SampleBuffer
//
// Accepts 16/24/32-bit integer and 32-bit float PCM, de-interleaves the
// sample stream per channel, and normalizes integers into [-1, 1]. No
// resampling is performed; the buffer carries whatever rate the file
// declares.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use thiserror::Error;
use tracing::debug;

use crate::audio::SampleBuffer;
use crate::error::AnalysisError;

/// Errors produced while turning encoded audio into a `SampleBuffer`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read WAV data: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported sample format: {bits}-bit {format}")]
    UnsupportedFormat { bits: u16, format: &'static str },

    #[error(transparent)]
    InvalidBuffer(#[from] AnalysisError),
}

/// Decode a WAV byte slice, e.g. an uploaded request body.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    decode_reader(WavReader::new(Cursor::new(bytes))?)
}

/// Decode a WAV file from disk.
pub fn decode_wav_file<P: AsRef<Path>>(path: P) -> Result<SampleBuffer, DecodeError> {
    decode_reader(WavReader::open(path)?)
}

fn decode_reader<R: std::io::Read>(mut reader: WavReader<R>) -> Result<SampleBuffer, DecodeError> {
    let spec = reader.spec();
    let channel_count = spec.channels as usize;

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, bits @ (16 | 24 | 32)) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
        (format, bits) => {
            return Err(DecodeError::UnsupportedFormat {
                bits,
                format: match format {
                    SampleFormat::Float => "float",
                    SampleFormat::Int => "int",
                },
            })
        }
    };

    let frames = interleaved.len() / channel_count.max(1);
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for (index, sample) in interleaved.iter().enumerate() {
        channels[index % channel_count].push(*sample);
    }

    debug!(
        sample_rate = spec.sample_rate,
        channels = channel_count,
        frames = frames,
        bits = spec.bits_per_sample,
        "decoded WAV input"
    );

    Ok(SampleBuffer::new(channels, spec.sample_rate)?)
}
