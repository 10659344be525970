#[path = "../../helpers/mod.rs"]
mod helpers;

use helpers::{RATE, pulsed_sine, sine, white_noise};
use meow2text::application::services::{FeatureExtractor, frame_energies};
use meow2text::domain::Waveform;

fn waveform(samples: Vec<f32>) -> Waveform {
    Waveform::new(samples, RATE).unwrap()
}

#[test]
fn given_steady_sine_when_extracting_then_estimates_its_pitch() {
    let extractor = FeatureExtractor::new();

    let features = extractor.extract(&waveform(sine(400.0, 1.0, 0.5, RATE)));

    assert!(
        (features.fundamental_frequency_estimate - 400.0).abs() < 5.0,
        "pitch estimate: {}",
        features.fundamental_frequency_estimate
    );
    assert!(features.has_pitch());
}

#[test]
fn given_steady_sine_when_extracting_then_energy_is_flat() {
    let extractor = FeatureExtractor::new();

    let features = extractor.extract(&waveform(sine(400.0, 1.0, 0.5, RATE)));

    let expected_rms = 0.5 / 2f64.sqrt();
    assert!((features.rms_energy - expected_rms).abs() < 0.01);
    assert!(features.energy_variance < 1e-4);
    assert!((features.duration - 1.0).abs() < 1e-9);
}

#[test]
fn given_steady_sine_when_extracting_then_zero_crossings_track_frequency() {
    let extractor = FeatureExtractor::new();

    let features = extractor.extract(&waveform(sine(400.0, 1.0, 0.5, RATE)));

    // Two crossings per cycle.
    let expected = 2.0 * 400.0 / RATE as f64;
    assert!((features.zero_crossing_rate - expected).abs() < 0.005);
}

#[test]
fn given_tone_passing_through_exact_zero_when_extracting_then_counts_crossings() {
    let extractor = FeatureExtractor::new();
    let samples: Vec<f32> = [0.0, 0.5, 0.0, -0.5].into_iter().cycle().take(8_000).collect();

    let features = extractor.extract(&waveform(samples));

    // One downward crossing into the negative sample and one back out per period.
    assert!(
        (features.zero_crossing_rate - 0.5).abs() < 0.01,
        "zero crossing rate: {}",
        features.zero_crossing_rate
    );
}

#[test]
fn given_low_and_high_tones_when_extracting_then_centroid_orders_them() {
    let extractor = FeatureExtractor::new();

    let low = extractor.extract(&waveform(sine(400.0, 1.0, 0.5, RATE)));
    let high = extractor.extract(&waveform(sine(3_000.0, 1.0, 0.5, RATE)));

    assert!(low.spectral_centroid > 300.0 && low.spectral_centroid < 800.0);
    assert!(high.spectral_centroid > low.spectral_centroid + 1_500.0);
}

#[test]
fn given_white_noise_when_extracting_then_reports_no_pitch() {
    let extractor = FeatureExtractor::new();

    let features = extractor.extract(&waveform(white_noise(1.0, 0.5)));

    assert_eq!(features.fundamental_frequency_estimate, 0.0);
    assert!(features.zero_crossing_rate > 0.3);
}

#[test]
fn given_pulsed_tone_when_extracting_then_energy_variance_exceeds_steady_tone() {
    let extractor = FeatureExtractor::new();

    let steady = extractor.extract(&waveform(sine(1_000.0, 1.5, 0.8, RATE)));
    let pulsed = extractor.extract(&waveform(pulsed_sine(1_000.0, 1.5, 0.8, 100, 100)));

    assert!(pulsed.energy_variance > steady.energy_variance + 0.03);
}

#[test]
fn given_same_waveform_twice_when_extracting_then_results_are_identical() {
    let extractor = FeatureExtractor::new();
    let clip = waveform(pulsed_sine(700.0, 1.2, 0.6, 80, 40));

    let first = extractor.extract(&clip);
    let second = extractor.extract(&clip);

    assert_eq!(first, second);
}

#[test]
fn given_clip_shorter_than_one_frame_when_extracting_then_does_not_panic() {
    let extractor = FeatureExtractor::new();

    let features = extractor.extract(&waveform(vec![0.5, -0.5, 0.5, -0.5, 0.5]));

    assert_eq!(features.fundamental_frequency_estimate, 0.0);
    assert!((features.rms_energy - 0.5).abs() < 1e-6);
    assert_eq!(features.energy_variance, 0.0);
}

#[test]
fn given_one_second_at_canonical_rate_when_framing_then_uses_ten_ms_hop() {
    let energies = frame_energies(&sine(400.0, 1.0, 0.5, RATE), RATE);

    // 320-sample frames every 160 samples.
    assert_eq!(energies.len(), (16_000 - 320) / 160 + 1);
}

#[test]
fn given_clip_shorter_than_one_frame_when_framing_then_returns_single_frame() {
    let energies = frame_energies(&[0.25; 100], RATE);

    assert_eq!(energies.len(), 1);
    assert!((energies[0] - 0.25).abs() < 1e-9);
}
