use std::io::Cursor;
use std::time::Duration;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioDecoder, AudioDecoderError, DecodedAudio};

/// Pure-Rust container/codec probe. Output is downmixed to mono at the
/// source sample rate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaAudioDecoder;

impl AudioDecoder for SymphoniaAudioDecoder {
    fn decode(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
        max_duration: Duration,
    ) -> Result<DecodedAudio, AudioDecoderError> {
        if data.is_empty() {
            return Err(AudioDecoderError::DecodingFailed("empty input".to_string()));
        }

        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = format_hint {
            hint.with_extension(extension);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| match e {
                SymphoniaError::Unsupported(what) => {
                    AudioDecoderError::UnsupportedFormat(what.to_string())
                }
                other => AudioDecoderError::DecodingFailed(format!("probe: {}", other)),
            })?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioDecoderError::DecodingFailed("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioDecoderError::DecodingFailed("unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1).max(1);

        let max_secs = max_duration.as_secs_f64();
        let frame_budget = (max_secs * sample_rate as f64).ceil() as u64;

        if let Some(declared) = codec_params.n_frames {
            if declared > frame_budget {
                tracing::warn!(declared, frame_budget, "Rejecting stream before decoding");
                return Err(AudioDecoderError::DurationExceeded { max_secs });
            }
        }

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioDecoderError::UnsupportedFormat(format!("codec: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(AudioDecoderError::DecodingFailed(format!("packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(error = %e, "Skipping corrupt audio frame");
                    continue;
                }
                Err(e) => {
                    return Err(AudioDecoderError::DecodingFailed(format!("decode: {}", e)));
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            if channels > 1 {
                samples.extend(
                    sample_buf
                        .samples()
                        .chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                );
            } else {
                samples.extend_from_slice(sample_buf.samples());
            }

            // The decoded total is the bound; a declared length is optional.
            if samples.len() as u64 > frame_budget {
                tracing::warn!(
                    decoded = samples.len(),
                    frame_budget,
                    "Stopping decode at duration limit"
                );
                return Err(AudioDecoderError::DurationExceeded { max_secs });
            }
        }

        if samples.is_empty() {
            return Err(AudioDecoderError::DecodingFailed(
                "no audio samples decoded".to_string(),
            ));
        }

        tracing::debug!(
            samples = samples.len(),
            sample_rate,
            channels,
            "Audio decoded to mono PCM"
        );

        Ok(DecodedAudio {
            samples,
            sample_rate,
        })
    }
}
