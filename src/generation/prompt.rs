// Prompt drafting - feature report to text-to-music prompt
//
// Threshold rules map each descriptor onto prompt vocabulary: centroid
// to a brightness adjective, zero-crossing rate to a texture adjective,
// the polyphony flag to an arrangement phrase. The drafted prompt seeds
// the generation request; callers may edit it before submitting.

use crate::analysis::FeatureReport;

/// Centroid below this is described as bass-heavy (Hz)
const CENTROID_DEEP_HZ: f32 = 500.0;
/// Centroid below this is described as warm (Hz)
const CENTROID_WARM_HZ: f32 = 2000.0;
/// Centroid below this is described as bright (Hz)
const CENTROID_BRIGHT_HZ: f32 = 5000.0;

/// ZCR below this reads as smooth and sustained
const ZCR_SMOOTH: f32 = 0.05;
/// ZCR below this reads as lively; above, percussive
const ZCR_LIVELY: f32 = 0.15;

/// Draft a generation prompt from extracted features.
pub fn draft_prompt(report: &FeatureReport) -> String {
    let brightness = if report.centroid_hz < CENTROID_DEEP_HZ {
        "deep, bass-heavy"
    } else if report.centroid_hz < CENTROID_WARM_HZ {
        "warm, mellow"
    } else if report.centroid_hz < CENTROID_BRIGHT_HZ {
        "bright"
    } else {
        "brilliant, airy"
    };

    let texture = if report.zero_crossing_rate < ZCR_SMOOTH {
        "smooth, sustained"
    } else if report.zero_crossing_rate < ZCR_LIVELY {
        "lively"
    } else {
        "percussive, noisy"
    };

    let arrangement = if report.polyphonic {
        "layered chords and overlapping voices"
    } else {
        "a single clear melodic line"
    };

    format!(
        "A {:.0}-second piece with a {} tonal character and a {} texture, built around {}.",
        report.format.duration_secs.max(1.0),
        brightness,
        texture,
        arrangement
    )
}
