use std::time::Duration;

/// Raw PCM produced by an [`AudioDecoder`], mono, at the source sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

pub trait AudioDecoder: Send + Sync {
    /// Implementations must stop decoding once the output would run longer
    /// than `max_duration` and return [`AudioDecoderError::DurationExceeded`].
    fn decode(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
        max_duration: Duration,
    ) -> Result<DecodedAudio, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("audio longer than {max_secs}s")]
    DurationExceeded { max_secs: f64 },
}
