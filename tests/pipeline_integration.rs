//! End-to-end scenarios through the public API
//!
//! These tests validate the full path from synthetic or decoded audio
//! through feature extraction, prompt drafting, the workflow session,
//! and the mock generation provider.

use musegen::analysis::FeatureExtractor;
use musegen::audio::{decode_wav_bytes, SampleBuffer};
use musegen::fixtures::{bin_frequency, SyntheticPattern};
use musegen::generation::{
    build_provider, options_from_config, prompt::draft_prompt, GenerationRequest,
};
use musegen::workflow::{Session, WizardStep};
use musegen::AppConfig;

const SAMPLE_RATE: u32 = 44100;

/// One second of silence: every feature reads as inert
#[test]
fn test_silent_buffer_end_to_end() {
    let buffer = SyntheticPattern::Silence.render(SAMPLE_RATE, 1.0).unwrap();
    let report = FeatureExtractor::default().analyze(&buffer).unwrap();

    assert_eq!(report.centroid_hz, 0.0);
    assert_eq!(report.zero_crossing_rate, 0.0);
    assert!(!report.polyphonic);
    assert_eq!(report.coefficients.len(), 13);
    assert_eq!(report.format.bit_depth, 16);
}

/// One second of a bin-aligned tone near 440 Hz at half amplitude
#[test]
fn test_tone_buffer_end_to_end() {
    let frequency = bin_frequency(SAMPLE_RATE, 2048, 20);
    let buffer = SyntheticPattern::Sine {
        frequency_hz: frequency,
        amplitude: 0.5,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();

    let report = FeatureExtractor::default().analyze(&buffer).unwrap();

    assert!(
        (report.centroid_hz - frequency).abs() < 5.0,
        "centroid {} should be near {}",
        report.centroid_hz,
        frequency
    );
    let expected_zcr = 2.0 * frequency / SAMPLE_RATE as f32;
    assert!(
        (report.zero_crossing_rate - expected_zcr).abs() < 0.001,
        "zcr {} should be near {}",
        report.zero_crossing_rate,
        expected_zcr
    );
    assert!(!report.polyphonic, "a single tone is not polyphonic");
}

/// A five-tone chord classifies as polyphonic and prompts accordingly
#[test]
fn test_chord_buffer_end_to_end() {
    let frequencies: Vec<f32> = [20usize, 45, 90, 180, 320]
        .iter()
        .map(|&bin| bin_frequency(SAMPLE_RATE, 2048, bin))
        .collect();
    let buffer = SyntheticPattern::MultiTone {
        frequencies,
        amplitude: 0.15,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();

    let report = FeatureExtractor::default().analyze(&buffer).unwrap();
    assert!(report.polyphonic, "a five-tone chord is polyphonic");

    let prompt = draft_prompt(&report);
    assert!(
        prompt.contains("layered"),
        "polyphonic report should draft a layered prompt: {}",
        prompt
    );
}

/// WAV bytes decode into the same report the raw buffer produces
#[test]
fn test_decoded_wav_matches_synthetic_report() {
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::io::Cursor;

    let frequency = bin_frequency(SAMPLE_RATE, 2048, 20);
    let buffer = SyntheticPattern::Sine {
        frequency_hz: frequency,
        amplitude: 0.5,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in buffer.channel(0) {
            writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    let decoded = decode_wav_bytes(&cursor.into_inner()).unwrap();
    let extractor = FeatureExtractor::default();
    let from_decoded = extractor.analyze(&decoded).unwrap();
    let from_synthetic = extractor.analyze(&buffer).unwrap();

    // 16-bit quantization barely moves the descriptors
    assert!((from_decoded.centroid_hz - from_synthetic.centroid_hz).abs() < 5.0);
    assert!(
        (from_decoded.zero_crossing_rate - from_synthetic.zero_crossing_rate).abs() < 0.001
    );
    assert_eq!(from_decoded.polyphonic, from_synthetic.polyphonic);
}

/// The full wizard path: upload, analyze, generate with the mock provider
#[test]
fn test_workflow_with_mock_provider() {
    let config = AppConfig::default();
    let provider = build_provider(&config.provider).unwrap();
    let options = options_from_config(&config.provider);
    let extractor = FeatureExtractor::new(config.analysis.clone());

    let buffer = SyntheticPattern::Sine {
        frequency_hz: bin_frequency(SAMPLE_RATE, 2048, 60),
        amplitude: 0.5,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();

    let mut session = Session::new();
    session.attach_audio(buffer).unwrap();

    let report = extractor.analyze(session.buffer().unwrap()).unwrap();
    let prompt = draft_prompt(&report);
    session.attach_report(report, prompt.clone()).unwrap();

    let request = GenerationRequest {
        prompt,
        duration_secs: 20.0,
        temperature: 1.0,
        seed: Some(11),
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime");
    let track = runtime
        .block_on(provider.generate(&request, &options))
        .unwrap();
    session.attach_track(track).unwrap();

    assert_eq!(session.step(), WizardStep::Done);
    let track = session.track().unwrap();
    assert!(track.audio_url.starts_with("mock://"));
    assert_eq!(track.seed, Some(11));
}

/// Analysis functions run independently from multiple threads
#[test]
fn test_concurrent_analysis_calls() {
    let buffer = SyntheticPattern::WhiteNoise {
        seed: 3,
        amplitude: 0.8,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();
    let buffer = std::sync::Arc::new(buffer);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let buffer = std::sync::Arc::clone(&buffer);
            std::thread::spawn(move || {
                FeatureExtractor::default().analyze(&buffer).unwrap()
            })
        })
        .collect();

    let reports: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("analysis thread panicked"))
        .collect();

    // Pure computation over immutable input: all threads agree
    for report in &reports[1..] {
        assert_eq!(report, &reports[0]);
    }
}

/// Stereo input is accepted and analyzed on channel 0 only
#[test]
fn test_stereo_channel_zero_behavior() {
    let frequency = bin_frequency(SAMPLE_RATE, 2048, 20);
    let tone = SyntheticPattern::Sine {
        frequency_hz: frequency,
        amplitude: 0.5,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();
    let noise = SyntheticPattern::WhiteNoise {
        seed: 1,
        amplitude: 0.8,
    }
    .render(SAMPLE_RATE, 1.0)
    .unwrap();

    let stereo = SampleBuffer::new(
        vec![tone.channel(0).to_vec(), noise.channel(0).to_vec()],
        SAMPLE_RATE,
    )
    .unwrap();

    let report = FeatureExtractor::default().analyze(&stereo).unwrap();
    assert!(
        (report.centroid_hz - frequency).abs() < 5.0,
        "features should follow channel 0, got centroid {}",
        report.centroid_hz
    );
}
