// Audio module - decoded sample buffers and the WAV decode boundary
//
// Analysis never touches encoded audio directly; everything flows through
// `SampleBuffer`, one float array per channel plus a sample rate. Decoding
// from uploaded bytes or files lives in `decode`.

mod buffer;
mod decode;

pub use buffer::SampleBuffer;
pub use decode::{decode_wav_bytes, decode_wav_file, DecodeError};
