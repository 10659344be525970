use serde::Serialize;

/// Scalar acoustic descriptors of one clip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Clip length in seconds.
    pub duration: f64,
    /// Root-mean-square amplitude over the whole clip.
    pub rms_energy: f64,
    /// Variance of per-frame RMS energy.
    pub energy_variance: f64,
    /// Fraction of adjacent sample pairs with a sign flip.
    pub zero_crossing_rate: f64,
    /// Dominant periodicity in Hz, 0 when no clear pitch was found.
    pub fundamental_frequency_estimate: f64,
    /// Frame-averaged spectral centroid in Hz.
    pub spectral_centroid: f64,
}

impl FeatureVector {
    pub fn has_pitch(&self) -> bool {
        self.fundamental_frequency_estimate > 0.0
    }
}
