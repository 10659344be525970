use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::application::services::feature_extractor::frame_energies;
use crate::domain::Waveform;
use crate::presentation::config::AudioSettings;

/// Peak frame RMS below this is treated as silence (about -60 dBFS).
pub const SILENCE_ENERGY_EPSILON: f64 = 1e-3;

/// Turns uploaded bytes into a validated, canonical-rate [`Waveform`].
pub struct AudioIngestor {
    decoder: Arc<dyn AudioDecoder>,
    settings: AudioSettings,
}

impl AudioIngestor {
    pub fn new(decoder: Arc<dyn AudioDecoder>, settings: AudioSettings) -> Self {
        Self { decoder, settings }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub fn ingest(&self, data: &[u8], format_hint: Option<&str>) -> Result<Waveform, IngestError> {
        if data.is_empty() {
            return Err(IngestError::InvalidAudio("empty payload".to_string()));
        }

        if data.len() > self.settings.max_file_size_bytes {
            return Err(IngestError::InvalidAudio(format!(
                "payload too large: {} bytes (max: {})",
                data.len(),
                self.settings.max_file_size_bytes
            )));
        }

        let hint = match format_hint {
            Some(raw) => Some(self.check_format(raw)?),
            None => None,
        };

        let max_duration = Duration::try_from_secs_f64(self.settings.max_duration_secs)
            .map_err(|e| IngestError::InvalidAudio(format!("max duration setting: {}", e)))?;
        let decoded = self.decoder.decode(data, hint.as_deref(), max_duration)?;

        if decoded.samples.is_empty() || decoded.sample_rate == 0 {
            return Err(IngestError::InvalidAudio(
                "decoder produced no samples".to_string(),
            ));
        }

        let duration = decoded.samples.len() as f64 / decoded.sample_rate as f64;
        if duration < self.settings.min_duration_secs || duration > self.settings.max_duration_secs
        {
            return Err(IngestError::InvalidAudio(format!(
                "invalid duration: {:.3}s (must be {}-{}s)",
                duration, self.settings.min_duration_secs, self.settings.max_duration_secs
            )));
        }

        let target_rate = self.settings.sample_rate;
        let samples = if decoded.sample_rate != target_rate {
            resample(&decoded.samples, decoded.sample_rate, target_rate)?
        } else {
            decoded.samples
        };

        let waveform = Waveform::new(samples, target_rate).ok_or_else(|| {
            IngestError::InvalidAudio("resampling produced no samples".to_string())
        })?;

        let peak_energy = frame_energies(waveform.samples(), target_rate)
            .into_iter()
            .fold(0.0_f64, f64::max);

        if peak_energy < SILENCE_ENERGY_EPSILON {
            tracing::info!(peak_energy, duration, "Rejecting silent clip");
            return Err(IngestError::Silent { peak_energy });
        }

        tracing::debug!(
            samples = waveform.samples().len(),
            duration_secs = waveform.duration_secs(),
            source_rate = decoded.sample_rate,
            "Audio ingested"
        );

        Ok(waveform)
    }

    fn check_format(&self, raw: &str) -> Result<String, IngestError> {
        let format = normalize_format_hint(raw);
        if self
            .settings
            .supported_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&format))
        {
            Ok(format)
        } else {
            Err(IngestError::InvalidAudio(format!(
                "unsupported format: {} (supported: {})",
                raw,
                self.settings.supported_formats.join(", ")
            )))
        }
    }
}

/// Accepts `wav`, `.wav`, `clip.wav` or `audio/wav` style hints.
pub fn normalize_format_hint(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    let tail = trimmed
        .rsplit(['/', '.'])
        .next()
        .unwrap_or(trimmed.as_str())
        .to_string();

    match tail.as_str() {
        "mpeg" | "mpga" => "mp3".to_string(),
        "x-wav" | "wave" => "wav".to_string(),
        "x-m4a" => "m4a".to_string(),
        "x-flac" => "flac".to_string(),
        _ => tail,
    }
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, IngestError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| IngestError::InvalidAudio(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let mut input = chunk.to_vec();
        input.resize(chunk_size, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| IngestError::InvalidAudio(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    let expected_len = (samples.len() as f64 * ratio) as usize;
    output.truncate(expected_len);

    Ok(output)
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
    #[error("no detectable signal (peak frame energy {peak_energy:.2e})")]
    Silent { peak_energy: f64 },
}

impl From<AudioDecoderError> for IngestError {
    fn from(e: AudioDecoderError) -> Self {
        IngestError::InvalidAudio(e.to_string())
    }
}

