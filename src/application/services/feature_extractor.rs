use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};

use crate::domain::{FeatureVector, Waveform};

pub const FRAME_MS: u32 = 20;
pub const HOP_MS: u32 = 10;

const MIN_PITCH_HZ: f64 = 200.0;
const MAX_PITCH_HZ: f64 = 2000.0;
/// Normalised autocorrelation a pitch peak must reach to count as "clear".
const PITCH_CLARITY_THRESHOLD: f64 = 0.3;
/// The first peak within this fraction of the strongest one wins, so octave
/// multiples of the true period are not picked.
const PITCH_PEAK_TOLERANCE: f64 = 0.9;

const SPECTRUM_FFT_SIZE: usize = 512;
const SPECTRUM_HOP: usize = SPECTRUM_FFT_SIZE / 2;
const SPECTRUM_MIN_MAGNITUDE: f64 = 1e-9;

/// Derives a [`FeatureVector`] from a waveform. Pure and deterministic.
pub struct FeatureExtractor {
    fft: Arc<dyn RealToComplex<f32>>,
    window: Vec<f32>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    pub fn new() -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(SPECTRUM_FFT_SIZE);

        let window = (0..SPECTRUM_FFT_SIZE)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * i as f32 / SPECTRUM_FFT_SIZE as f32;
                0.5 * (1.0 - phase.cos())
            })
            .collect();

        Self { fft, window }
    }

    pub fn extract(&self, waveform: &Waveform) -> FeatureVector {
        let samples = waveform.samples();
        let sample_rate = waveform.sample_rate();

        let energies = frame_energies(samples, sample_rate);

        FeatureVector {
            duration: waveform.duration_secs(),
            rms_energy: rms(samples),
            energy_variance: variance(&energies),
            zero_crossing_rate: zero_crossing_rate(samples),
            fundamental_frequency_estimate: estimate_pitch(samples, sample_rate),
            spectral_centroid: self.spectral_centroid(samples, sample_rate),
        }
    }

    fn spectral_centroid(&self, samples: &[f32], sample_rate: u32) -> f64 {
        let bin_hz = sample_rate as f64 / SPECTRUM_FFT_SIZE as f64;
        let mut input = self.fft.make_input_vec();
        let mut spectrum = self.fft.make_output_vec();

        let frame_starts: Vec<usize> = if samples.len() <= SPECTRUM_FFT_SIZE {
            vec![0]
        } else {
            (0..=(samples.len() - SPECTRUM_FFT_SIZE))
                .step_by(SPECTRUM_HOP)
                .collect()
        };

        let mut centroid_sum = 0.0;
        let mut voiced_frames = 0usize;

        for start in frame_starts {
            for (i, slot) in input.iter_mut().enumerate() {
                *slot = samples.get(start + i).copied().unwrap_or(0.0) * self.window[i];
            }

            if self.fft.process(&mut input, &mut spectrum).is_err() {
                continue;
            }

            let mut weighted = 0.0;
            let mut total = 0.0;
            for (k, bin) in spectrum.iter().enumerate() {
                let magnitude = bin.norm() as f64;
                weighted += k as f64 * bin_hz * magnitude;
                total += magnitude;
            }

            if total > SPECTRUM_MIN_MAGNITUDE {
                centroid_sum += weighted / total;
                voiced_frames += 1;
            }
        }

        if voiced_frames == 0 {
            0.0
        } else {
            centroid_sum / voiced_frames as f64
        }
    }
}

/// Per-frame RMS over 20 ms windows with a 10 ms hop.
///
/// A clip shorter than one window yields a single frame covering all of it.
pub fn frame_energies(samples: &[f32], sample_rate: u32) -> Vec<f64> {
    let frame_len = ((sample_rate * FRAME_MS / 1000) as usize).max(1);
    let hop = ((sample_rate * HOP_MS / 1000) as usize).max(1);

    if samples.len() <= frame_len {
        return vec![rms(samples)];
    }

    (0..=(samples.len() - frame_len))
        .step_by(hop)
        .map(|start| rms(&samples[start..start + frame_len]))
        .collect()
}

fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Exact zeros count as positive, so a swing through 0.0 is still a crossing.
fn zero_crossing_rate(samples: &[f32]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let crossings = samples
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    crossings as f64 / (samples.len() - 1) as f64
}

/// Autocorrelation pitch estimate restricted to the vocal band, 0 when no
/// clear periodicity exists.
fn estimate_pitch(samples: &[f32], sample_rate: u32) -> f64 {
    let rate = sample_rate as f64;
    let min_lag = ((rate / MAX_PITCH_HZ).floor() as usize).max(2);
    let max_lag = (rate / MIN_PITCH_HZ).ceil() as usize;

    if max_lag <= min_lag || samples.len() <= max_lag + 2 {
        return 0.0;
    }

    // One extra lag on each side so the band edges can be tested as peaks.
    let correlations: Vec<f64> = (min_lag - 1..=max_lag + 1)
        .map(|lag| normalized_autocorrelation(samples, lag))
        .collect();
    let at = |lag: usize| correlations[lag - (min_lag - 1)];

    let peaks: Vec<usize> = (min_lag..=max_lag)
        .filter(|&lag| at(lag) > at(lag - 1) && at(lag) >= at(lag + 1))
        .collect();

    let strongest = peaks.iter().map(|&lag| at(lag)).fold(0.0_f64, f64::max);
    if strongest < PITCH_CLARITY_THRESHOLD {
        return 0.0;
    }

    let Some(&lag) = peaks
        .iter()
        .find(|&&lag| at(lag) >= strongest * PITCH_PEAK_TOLERANCE)
    else {
        return 0.0;
    };

    let (left, centre, right) = (at(lag - 1), at(lag), at(lag + 1));
    let curvature = left - 2.0 * centre + right;
    let offset = if curvature.abs() > f64::EPSILON {
        (0.5 * (left - right) / curvature).clamp(-0.5, 0.5)
    } else {
        0.0
    };

    rate / (lag as f64 + offset)
}

fn normalized_autocorrelation(samples: &[f32], lag: usize) -> f64 {
    let mut cross = 0.0;
    let mut head_energy = 0.0;
    let mut tail_energy = 0.0;

    for (a, b) in samples.iter().zip(&samples[lag..]) {
        let (a, b) = (*a as f64, *b as f64);
        cross += a * b;
        head_energy += a * a;
        tail_energy += b * b;
    }

    let norm = (head_energy * tail_energy).sqrt();
    if norm > 0.0 { cross / norm } else { 0.0 }
}
