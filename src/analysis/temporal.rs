// Temporal module - time-domain features
//
// Zero-crossing rate measures how often the signal changes sign. High
// values indicate noise-like or high-frequency content, low values tonal
// or low-frequency content.

/// Compute the zero-crossing rate of one channel.
///
/// A crossing is any index where the boolean "is this sample ≥ 0" differs
/// from the previous sample's. The count is normalized by `len - 1`, so
/// the result lies in [0, 1]: 0 for a constant-sign signal, 1 for input
/// alternating sign every sample.
///
/// # Arguments
/// * `samples` - Time-domain audio signal (whole channel)
pub fn zero_crossing_rate(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let mut crossings = 0usize;
    for i in 1..samples.len() {
        if (samples[i] >= 0.0) != (samples[i - 1] >= 0.0) {
            crossings += 1;
        }
    }

    crossings as f32 / (samples.len() - 1) as f32
}
