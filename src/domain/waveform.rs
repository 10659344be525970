/// Decoded mono audio at a known sample rate, amplitudes clamped to [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Returns `None` when the sample rate is zero or there are no samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Option<Self> {
        if sample_rate == 0 || samples.is_empty() {
            return None;
        }

        let samples = samples
            .into_iter()
            .map(|s| if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 })
            .collect();

        Some(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
